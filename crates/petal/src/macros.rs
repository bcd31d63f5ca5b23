/// Gives a `String` newtype a `&str` conversion.
#[macro_export]
macro_rules! string_newtype {
    ($name:ty) => {
        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}
