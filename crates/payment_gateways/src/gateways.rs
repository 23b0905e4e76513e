pub mod izipay;

pub use self::izipay::IzipaySettings;
