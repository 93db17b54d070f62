/// Parses a CSS selector once and hands out a `&'static Selector`.
///
/// The literal is checked on first use; an invalid selector is a bug in
/// the caller, hence the panic.
#[macro_export]
macro_rules! selector {
    ($e: expr) => {{
        use $crate::__private::{Lazy, Selector};
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($e).unwrap());
        &*SELECTOR
    }};
}
