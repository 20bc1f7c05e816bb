//! Bus abstraction the driver writes through.

/// Register-level access to the panel.
///
/// Implementations wrap the board's bus bridge: a command/data register
/// pair for the controller and a control port for the reset and power
/// lines. Writes are synchronous; the driver assumes each one has completed
/// when the call returns.
pub trait DeviceInterface {
    /// Writes one bus word. `is_data` selects the data register, otherwise
    /// the value is latched as a command.
    fn write(&mut self, is_data: bool, value: u16);

    /// Drives the reset/power lines.
    fn power_config(&mut self, on: bool);

    /// Checks the bus bridge is present and responding. Called once by
    /// [`Lt24::initialise`](super::Lt24::initialise) before any write.
    fn bring_up(&mut self) -> bool {
        true
    }

    /// Blocks for the given number of milliseconds.
    fn delay_ms(&mut self, _ms: u32) {}
}
