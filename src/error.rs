#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Malformed prescale mask or alarm without any match field
    InvalidParameter,
    /// The channel or alarm slot already holds a client
    AlreadyOwned,
    /// The client is not registered anywhere
    NotFound,
    /// The 32 kHz oscillator reports a fault
    OscillatorFault,
    /// Saved segment does not carry the magic cookie
    NoSavedTime,
}
