/// Builds a [`Value`](crate::Value) from an inline literal.
///
/// Lists and maps nest; trailing commas are accepted. Numbers always become
/// `Value::Number`, matching the parser's everything-is-a-float rule.
///
/// ```rust
/// use zolo::zolo;
///
/// let config = zolo!({
///     "host": "localhost",
///     "port": 8080,
///     "tags": ["a", "b"],
///     "extra": null,
/// });
/// assert_eq!(config.get("port").unwrap().as_f64(), Some(8080.0));
/// ```
#[macro_export]
macro_rules! zolo {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::zolo!($elem)),*])
    };

    ({}) => {
        $crate::Value::Map($crate::ZoloMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::ZoloMap::new();
        $(
            map.insert($key.to_string(), $crate::zolo!($value));
        )*
        $crate::Value::Map(map)
    }};

    // Fallback for plain expressions: anything with a From impl.
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
