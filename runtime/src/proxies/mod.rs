//! Concrete `Proxy` implementers (§4.3). `VanillaArray`/`VanillaObject` back
//! array/object literals; `VanillaFunction` backs a `FuncDecl`'s value;
//! `StringMethod` is the ad-hoc bound-method value a string's `.hash`,
//! `.slice`, … property access produces; `Manifestation` is the `string` /
//! `object` / `type` static namespace; `BuiltinFn` is the minimal
//! closure-backed proxy everything else (`print`, `array.join`, `type.of`)
//! is built from; `RuntimeException` is what a caught error looks like from
//! inside an egg `catch` clause.

mod array;
mod builtin_fn;
mod exception;
mod function;
mod manifestation;
mod object;
mod string_method;

pub use array::{assign_op_of, VanillaArray};
pub use builtin_fn::BuiltinFn;
pub use exception::RuntimeException;
pub use function::VanillaFunction;
pub use manifestation::Manifestation;
pub use object::VanillaObject;
pub use string_method::{string_method_names, StringMethod};
