use thiserror::Error;

/// Contract violations rejected by the carousel without touching its state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    #[error("slide index {index} is out of range for {len} promos")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("carousel is no longer mounted")]
    Unmounted,

    #[error(transparent)]
    Carousel(#[from] CarouselError),
}
