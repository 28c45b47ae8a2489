//! Dynamic code generation
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`builder`] | `DynamicModuleBuilder` collecting classes and sources |
//! | [`class`] | `GeneratedClass` struct and impl block rendering |
//! | [`function`] | Constructors and methods under construction |
//! | [`compiler`] | `syn`-based `SourceCompiler` writing the artifact |

pub mod builder;
pub mod class;
pub mod compiler;
pub mod function;

pub use builder::{BuildCallback, DynamicModuleBuilder};
pub use class::GeneratedClass;
pub use compiler::SyntaxCheckingCompiler;
pub use function::{
    GeneratedFunction, GeneratedParameter, MethodSignature, ParameterKind, Receiver, Visibility,
};
