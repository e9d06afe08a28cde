/// A write to one of the fixture's outputs failed.
///
/// Carries the pin error of the output that failed. With the on-chip GPIO
/// the pin error is `Infallible`, so this never occurs on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    Lamps(E),
    Digits(E),
    Display(E),
}
