use recast_engine::infer_str;

use crate::config::InferArgs;
use crate::error::CliError;

pub fn run(args: InferArgs) -> Result<(), CliError> {
    for text in &args.text {
        let value = infer_str(text);
        let line = serde_json::json!({
            "text": text,
            "kind": value.kind().label(),
            "value": value.to_json(),
        });
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}
