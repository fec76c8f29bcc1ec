//! Method argument resolution.
//!
//! One pass over a declared parameter list serves both constructor
//! injection and action argument binding: service-typed parameters come
//! from the container, everything else from the caller's known values.

use std::collections::HashMap;

use tracing::trace;

use crate::coerce;
use crate::descriptors::{MethodParameter, ParamType, ScalarKind};
use crate::error::{DiError, DiResult};
use crate::traits::ResolverCore;
use crate::value::{Arguments, Value};

pub(crate) fn method_depends<R: ResolverCore + ?Sized>(
    resolver: &R,
    parameters: &[MethodParameter],
    method: &str,
    known: &HashMap<String, String>,
) -> DiResult<Arguments> {
    let mut args = Arguments::new();

    for parameter in parameters {
        let value = match &parameter.declared {
            ParamType::Service(id) => {
                trace!(parameter = %parameter.name, service = %id, "Resolving service parameter");
                Value::Service(resolver.get(id)?)
            }
            declared => {
                let raw = known.get(&parameter.name).ok_or_else(|| DiError::MissingMethodArgument {
                    parameter: parameter.name.clone(),
                    method: method.to_string(),
                })?;
                match declared {
                    ParamType::Scalar(kind) => cast(*kind, raw),
                    _ => Value::Raw(raw.clone()),
                }
            }
        };
        args.push(parameter.name.clone(), value);
    }

    Ok(args)
}

/// Explicit cast of a caller value to the declared scalar kind.
pub(crate) fn cast(kind: ScalarKind, raw: &str) -> Value {
    match kind {
        ScalarKind::Int => Value::Int(coerce::to_int(raw)),
        ScalarKind::Float => Value::Float(coerce::to_float(raw)),
        ScalarKind::Bool => Value::Bool(coerce::to_bool(raw)),
        ScalarKind::String => Value::Str(raw.to_string()),
    }
}
