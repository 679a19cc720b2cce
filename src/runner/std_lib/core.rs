//! Core built-ins registration.

use crate::runner::plugin::registry::BuiltInRegistry;

use super::array;
use super::boolean;
use super::console;
use super::global;
use super::math;
use super::number;
use super::object;
use super::string;

/// Register every standard native with the registry.
pub fn register_core_builtins(registry: &mut BuiltInRegistry) {
    global::register(registry);
    object::register(registry);
    array::register(registry);
    string::register(registry);
    number::register(registry);
    boolean::register(registry);
    math::register(registry);
    console::register(registry);
}
