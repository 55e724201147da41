use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FundMeError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 3,
    InsufficientContribution = 4,
    IndexOutOfRange = 5,
    TransferFailed = 6,
    InvalidPrice = 7,
    ConversionOverflow = 8,
    ArithmeticOverflow = 9,
    InvalidAmount = 10,
}
