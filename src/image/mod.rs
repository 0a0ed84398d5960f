pub mod f32;
pub mod io;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::io::GrayBuffer;
pub use self::u8::ImageU8;
