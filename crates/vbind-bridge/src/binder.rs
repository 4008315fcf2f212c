//! Positional, type-directed binding of manifest arguments to native functions.
//!
//! Each native parameter type implements [`FromArgument`], which names the
//! extractor read to use for it. A function of N such parameters implements
//! [`Process`] (or [`ContainerProcess`] when it takes a `&mut` container
//! first). Binding pairs the function's parameter list with the manifest's
//! argument list by position, once; calling the bound process is then a
//! straight run of N extractions followed by one call. The first failed
//! extraction aborts the call and the function is never invoked.

use crate::errors::BridgeError;
use crate::extractor::ArgumentExtractor;
use crate::gateway::ArgumentSource;
use std::marker::PhantomData;
use vbind_logger as logger;
use vbind_manifest::{ArgumentManifest, ArgumentType};
use vbind_value::Value;

/// How a native parameter is read from the argument collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgClass {
    Bool,
    Integral,
    Float,
    String,
    Array,
    Object,
}

impl ArgClass {
    /// The manifest type tag this class reads
    pub fn argument_type(self) -> ArgumentType {
        match self {
            ArgClass::Bool => ArgumentType::Bool,
            ArgClass::Integral => ArgumentType::Int,
            ArgClass::Float => ArgumentType::Float,
            ArgClass::String => ArgumentType::String,
            ArgClass::Array => ArgumentType::Array,
            ArgClass::Object => ArgumentType::Object,
        }
    }
}

// =============================================================================
// PARAMETER TYPES
// =============================================================================

/// A native parameter type that can be read from the argument collection
pub trait FromArgument: Sized {
    const CLASS: ArgClass;

    fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError>;
}

impl FromArgument for bool {
    const CLASS: ArgClass = ArgClass::Bool;

    fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError> {
        extractor.get_bool(name)
    }
}

fn out_of_range(name: &str, value: impl std::fmt::Display, target: &str) -> BridgeError {
    BridgeError::Conversion(format!(
        "argument '{}' value {} does not fit in {}",
        name, value, target
    ))
}

macro_rules! signed_argument {
    ($($t:ty),*) => {$(
        impl FromArgument for $t {
            const CLASS: ArgClass = ArgClass::Integral;

            fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError> {
                let value = extractor.get_int(name)?;
                <$t>::try_from(value).map_err(|_| out_of_range(name, value, stringify!($t)))
            }
        }
    )*};
}

macro_rules! unsigned_argument {
    ($($t:ty),*) => {$(
        impl FromArgument for $t {
            const CLASS: ArgClass = ArgClass::Integral;

            fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError> {
                let value = extractor.get_uint(name)?;
                <$t>::try_from(value).map_err(|_| out_of_range(name, value, stringify!($t)))
            }
        }
    )*};
}

signed_argument!(i8, i16, i32, i64, isize);
unsigned_argument!(u8, u16, u32, u64, usize);

impl FromArgument for f64 {
    const CLASS: ArgClass = ArgClass::Float;

    fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError> {
        extractor.get_float(name)
    }
}

impl FromArgument for f32 {
    const CLASS: ArgClass = ArgClass::Float;

    fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError> {
        extractor.get_float(name).map(|v| v as f32)
    }
}

impl FromArgument for String {
    const CLASS: ArgClass = ArgClass::String;

    fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError> {
        extractor.get_string(name)
    }
}

impl FromArgument for Vec<Value> {
    const CLASS: ArgClass = ArgClass::Array;

    fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError> {
        extractor.get_array(name)
    }
}

impl FromArgument for Value {
    const CLASS: ArgClass = ArgClass::Object;

    fn extract(extractor: &ArgumentExtractor<'_>, name: &str) -> Result<Self, BridgeError> {
        extractor.get_object(name)
    }
}

// =============================================================================
// CALLABLE SHAPES
// =============================================================================

/// A free function whose parameters can all be extracted
pub trait Process<Args> {
    type Output;

    /// Parameter classes in declaration order
    fn classes() -> Vec<ArgClass>;

    /// Extract one argument per name, in order, then call
    fn call_with(
        &self,
        extractor: &ArgumentExtractor<'_>,
        names: &[String],
    ) -> Result<Option<Self::Output>, BridgeError>;
}

/// A container method: a function taking `&mut C` followed by extractable
/// parameters
pub trait ContainerProcess<C, Args> {
    type Output;

    fn classes() -> Vec<ArgClass>;

    fn call_with(
        &self,
        container: &mut C,
        extractor: &ArgumentExtractor<'_>,
        names: &[String],
    ) -> Result<Option<Self::Output>, BridgeError>;
}

/// Next argument name for a function taking `expected` parameters
fn next_name<'n>(
    names: &mut std::slice::Iter<'n, String>,
    expected: usize,
    declared: usize,
) -> Result<&'n str, BridgeError> {
    names
        .next()
        .map(String::as_str)
        .ok_or(BridgeError::ArityMismatch { expected, declared })
}

// Zero-parameter functions ignore the argument collection.
impl<Func, Out> Process<()> for Func
where
    Func: Fn() -> Option<Out>,
{
    type Output = Out;

    fn classes() -> Vec<ArgClass> {
        Vec::new()
    }

    fn call_with(
        &self,
        _extractor: &ArgumentExtractor<'_>,
        _names: &[String],
    ) -> Result<Option<Out>, BridgeError> {
        Ok(self())
    }
}

impl<Func, C, Out> ContainerProcess<C, ()> for Func
where
    Func: Fn(&mut C) -> Option<Out>,
{
    type Output = Out;

    fn classes() -> Vec<ArgClass> {
        Vec::new()
    }

    fn call_with(
        &self,
        container: &mut C,
        _extractor: &ArgumentExtractor<'_>,
        _names: &[String],
    ) -> Result<Option<Out>, BridgeError> {
        Ok(self(container))
    }
}

macro_rules! callable_arity {
    ($($arg:ident $val:ident),+) => {
        impl<Func, Out, $($arg),+> Process<($($arg,)+)> for Func
        where
            Func: Fn($($arg),+) -> Option<Out>,
            $($arg: FromArgument,)+
        {
            type Output = Out;

            fn classes() -> Vec<ArgClass> {
                vec![$($arg::CLASS),+]
            }

            fn call_with(
                &self,
                extractor: &ArgumentExtractor<'_>,
                names: &[String],
            ) -> Result<Option<Out>, BridgeError> {
                let expected = [$(stringify!($val)),+].len();
                let mut cursor = names.iter();
                $(let $val = $arg::extract(
                    extractor,
                    next_name(&mut cursor, expected, names.len())?,
                )?;)+
                Ok(self($($val),+))
            }
        }

        impl<Func, C, Out, $($arg),+> ContainerProcess<C, ($($arg,)+)> for Func
        where
            Func: Fn(&mut C, $($arg),+) -> Option<Out>,
            $($arg: FromArgument,)+
        {
            type Output = Out;

            fn classes() -> Vec<ArgClass> {
                vec![$($arg::CLASS),+]
            }

            fn call_with(
                &self,
                container: &mut C,
                extractor: &ArgumentExtractor<'_>,
                names: &[String],
            ) -> Result<Option<Out>, BridgeError> {
                let expected = [$(stringify!($val)),+].len();
                let mut cursor = names.iter();
                $(let $val = $arg::extract(
                    extractor,
                    next_name(&mut cursor, expected, names.len())?,
                )?;)+
                Ok(self(container, $($val),+))
            }
        }
    };
}

callable_arity!(A1 a1);
callable_arity!(A1 a1, A2 a2);
callable_arity!(A1 a1, A2 a2, A3 a3);
callable_arity!(A1 a1, A2 a2, A3 a3, A4 a4);
callable_arity!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
callable_arity!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
callable_arity!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
callable_arity!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);

// =============================================================================
// BINDING
// =============================================================================

/// Pair parameter classes with declared arguments by position and return
/// the argument names to read, in order
fn plan(arguments: &[ArgumentManifest], classes: &[ArgClass]) -> Result<Vec<String>, BridgeError> {
    if arguments.len() < classes.len() {
        return Err(BridgeError::ArityMismatch {
            expected: classes.len(),
            declared: arguments.len(),
        });
    }

    for (argument, class) in arguments.iter().zip(classes) {
        if argument.type_name != class.argument_type() {
            logger::warn(&format!(
                "argument '{}' is declared as {} but bound to a {} parameter",
                argument.name,
                argument.type_name,
                class.argument_type()
            ));
        }
    }

    if arguments.len() > classes.len() {
        logger::debug(&format!(
            "{} declared argument(s) beyond the function's parameters are ignored",
            arguments.len() - classes.len()
        ));
    }

    Ok(arguments
        .iter()
        .take(classes.len())
        .map(|a| a.name.clone())
        .collect())
}

/// A free function bound to a manifest's argument order
pub struct BoundProcess<F, Args> {
    function: F,
    names: Vec<String>,
    _args: PhantomData<fn(Args)>,
}

impl<F, Args> BoundProcess<F, Args>
where
    F: Process<Args>,
{
    /// Argument names read by each call, in parameter order
    pub fn argument_names(&self) -> &[String] {
        &self.names
    }

    /// Extract every argument from `source` and invoke the function
    pub fn call(&self, source: &dyn ArgumentSource) -> Result<Option<F::Output>, BridgeError> {
        let extractor = ArgumentExtractor::new(source);
        self.function.call_with(&extractor, &self.names)
    }
}

/// A container method bound to a manifest's argument order
pub struct BoundContainerProcess<F, C, Args> {
    function: F,
    names: Vec<String>,
    _args: PhantomData<fn(&mut C, Args)>,
}

impl<F, C, Args> BoundContainerProcess<F, C, Args>
where
    F: ContainerProcess<C, Args>,
{
    pub fn argument_names(&self) -> &[String] {
        &self.names
    }

    pub fn call(
        &self,
        container: &mut C,
        source: &dyn ArgumentSource,
    ) -> Result<Option<F::Output>, BridgeError> {
        let extractor = ArgumentExtractor::new(source);
        self.function.call_with(container, &extractor, &self.names)
    }
}

/// Bind `function` to the declared `arguments`.
///
/// Fails when the manifest declares fewer arguments than the function takes.
pub fn bind_process<F, Args>(
    arguments: &[ArgumentManifest],
    function: F,
) -> Result<BoundProcess<F, Args>, BridgeError>
where
    F: Process<Args>,
{
    let names = plan(arguments, &F::classes())?;
    logger::step(&format!("bound process arguments {:?}", names));
    Ok(BoundProcess {
        function,
        names,
        _args: PhantomData,
    })
}

/// Bind a container method to the declared `arguments`
pub fn bind_container_process<F, C, Args>(
    arguments: &[ArgumentManifest],
    function: F,
) -> Result<BoundContainerProcess<F, C, Args>, BridgeError>
where
    F: ContainerProcess<C, Args>,
{
    let names = plan(arguments, &F::classes())?;
    logger::step(&format!("bound container process arguments {:?}", names));
    Ok(BoundContainerProcess {
        function,
        names,
        _args: PhantomData,
    })
}
