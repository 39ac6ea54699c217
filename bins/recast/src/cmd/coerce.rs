use recast_api::{TypeDesc, Value};
use recast_engine::{coerce, infer_str, project};

use crate::config::CoerceArgs;
use crate::error::CliError;

pub fn run(args: CoerceArgs) -> Result<(), CliError> {
    let target: TypeDesc = args.ty.parse()?;
    let value = if args.raw {
        Value::text(args.text.as_str())
    } else {
        infer_str(&args.text)
    };
    tracing::debug!(%value, %target, "coercing");

    let coerced = coerce(&value, &target)?;
    let line = serde_json::json!({
        "type": target.to_string(),
        "kind": coerced.kind().label(),
        "value": coerced.to_json(),
        "text": project(&coerced)?,
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}
