//! ILI9341 command set and bring-up sequence.
//!
//! Every bus cycle carries a 16-bit value with a data/command flag. Commands
//! are 8-bit opcodes; their parameters follow as data words holding one byte
//! each. Pixel data after [`Command::MemoryWrite`] is one RGB565 word per
//! cycle.

/// Controller commands used by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Software reset.
    SoftwareReset = 0x01,
    /// Leave sleep mode.
    SleepOut = 0x11,
    /// Gamma curve select.
    GammaSet = 0x26,
    /// Display output on.
    DisplayOn = 0x29,
    /// Column address range (start and end column).
    ColumnAddressSet = 0x2A,
    /// Page address range (start and end row).
    PageAddressSet = 0x2B,
    /// Begin streaming pixel data into the addressed window.
    MemoryWrite = 0x2C,
    /// Memory access control (scan direction, colour order).
    MemoryAccessControl = 0x36,
    /// Interface pixel format.
    PixelFormat = 0x3A,
    /// Frame rate control (normal mode).
    FrameRateControl = 0xB1,
    /// Display function control.
    DisplayFunctionControl = 0xB6,
    /// GVDD level.
    PowerControl1 = 0xC0,
    /// Step-up factor.
    PowerControl2 = 0xC1,
    /// VCOMH/VCOML voltage.
    VcomControl1 = 0xC5,
    /// VCOM offset.
    VcomControl2 = 0xC7,
    PowerControlA = 0xCB,
    PowerControlB = 0xCF,
    DriverTimingA = 0xE8,
    DriverTimingB = 0xEA,
    PowerOnSequence = 0xED,
    Enable3Gamma = 0xF2,
    InterfaceControl = 0xF6,
    PumpRatioControl = 0xF7,
}

impl Command {
    /// Returns the opcode as a bus word.
    pub fn word(self) -> u16 {
        self as u16
    }
}

/// MADCTL value: portrait scan, BGR panel colour order.
pub const MADCTL_PORTRAIT_BGR: u16 = 0x08;

/// COLMOD value: 16 bits per pixel on both RGB and MCU interfaces.
pub const PIXEL_FORMAT_16BPP: u16 = 0x55;

/// A bring-up step: a command, its parameter words, and a settle delay.
pub struct InitStep {
    pub command: Command,
    pub params: &'static [u16],
    pub delay_ms: u32,
}

const fn step(command: Command, params: &'static [u16], delay_ms: u32) -> InitStep {
    InitStep {
        command,
        params,
        delay_ms,
    }
}

/// Controller configuration sent after the panel is powered up.
pub const INIT_SEQUENCE: &[InitStep] = &[
    step(Command::SoftwareReset, &[], 5),
    step(Command::SleepOut, &[], 120),
    step(Command::PowerControlB, &[0x00, 0x81, 0xC0], 0),
    step(Command::PowerOnSequence, &[0x64, 0x03, 0x12, 0x81], 0),
    step(Command::DriverTimingA, &[0x85, 0x01, 0x79], 0),
    step(Command::PowerControlA, &[0x39, 0x2C, 0x00, 0x34, 0x02], 0),
    step(Command::PumpRatioControl, &[0x20], 0),
    step(Command::DriverTimingB, &[0x00, 0x00], 0),
    step(Command::FrameRateControl, &[0x00, 0x1B], 0),
    step(Command::DisplayFunctionControl, &[0x0A, 0xA2], 0),
    step(Command::PowerControl1, &[0x05], 0),
    step(Command::PowerControl2, &[0x11], 0),
    step(Command::VcomControl1, &[0x45, 0x45], 0),
    step(Command::VcomControl2, &[0xA2], 0),
    step(Command::MemoryAccessControl, &[MADCTL_PORTRAIT_BGR], 0),
    step(Command::Enable3Gamma, &[0x00], 0),
    step(Command::GammaSet, &[0x01], 0),
    step(Command::PixelFormat, &[PIXEL_FORMAT_16BPP], 0),
    step(Command::InterfaceControl, &[0x01, 0x30, 0x00], 0),
    step(Command::DisplayOn, &[], 20),
];

/// Splits an inclusive address range into the four parameter bytes of
/// [`Command::ColumnAddressSet`] / [`Command::PageAddressSet`].
pub fn address_range(start: u16, end: u16) -> [u16; 4] {
    [start >> 8, start & 0xFF, end >> 8, end & 0xFF]
}

/// Inverse of [`address_range`].
pub fn parse_address_range(params: &[u16]) -> Option<(u16, u16)> {
    match params {
        [sh, sl, eh, el] => Some((
            ((sh & 0xFF) << 8) | (sl & 0xFF),
            ((eh & 0xFF) << 8) | (el & 0xFF),
        )),
        _ => None,
    }
}
