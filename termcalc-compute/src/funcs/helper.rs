/// Build builtin functions that take a single numeric argument.
///
/// Each function is a unit `struct` with an `eval_static` method, and implements [`Builtin`] so
/// it can be registered in a [`Funcs`] table.
///
/// [`Builtin`]: crate::funcs::Builtin
/// [`Funcs`]: crate::numerical::ctxt::Funcs
macro_rules! build_unary {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(n: f64) -> f64 {
                    // NOTE: the closure call is contained within the macro, so we allow
                    // the clippy::redundant_closure_call lint
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(n)
                }
            }

            impl $crate::funcs::Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn arity(&self) -> usize {
                    1
                }

                fn eval(&self, args: &[f64]) -> f64 {
                    Self::eval_static(args[0])
                }
            }
        )*
    };
}
