mod villa;

pub use villa::Villa;
