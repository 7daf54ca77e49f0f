mod args;

pub use args::{
    AdapterCommand, Args, Command, DeviceCommand, EventCommand, EventListenFlags, ListFlags,
    LogicalDeviceCommand, OutputFormat, StackCommand,
};
