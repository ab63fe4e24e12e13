use tapedeck_core::scheduler::TaskHandle;

/// Callbacks the scheduler delivers to the app loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A requested display-refresh frame is due.
    Frame(TaskHandle),
    /// A ticker period elapsed.
    Tick(TaskHandle),
}
