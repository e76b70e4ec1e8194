use bacserve_core::types::{ObjectId, PropertyId};
use bacserve_device::{DeviceServer, LoggingEngine, PropertyRequest};
use bacserve_tools::{error_to_json, load_config, value_to_json, ObjectTypeArg, ValueKindArg};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bacserve-readprop")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "analog-input")]
    object_type: ObjectTypeArg,
    #[arg(long, default_value_t = 0)]
    instance: u32,
    /// Numeric property identifier (85 = present-value).
    #[arg(long, default_value_t = 85)]
    property: u32,
    /// Array index; 0 asks for the length.
    #[arg(long)]
    index: Option<u32>,
    #[arg(long, value_enum, default_value = "real")]
    kind: ValueKindArg,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let server = DeviceServer::new(&config, LoggingEngine)?;

    let object_type = args.object_type.into_object_type();
    let mut request = PropertyRequest::new(
        object_type,
        args.instance,
        PropertyId::from_u32(args.property),
    );
    request.array_index = args.index;

    let result = server
        .catalog()
        .read_property(&request, args.kind.into_value_kind());
    let object = ObjectId::new(object_type, args.instance);
    let output = match &result {
        Ok(value) => json!({
            "object": object.to_string(),
            "property": args.property,
            "index": args.index,
            "value": value_to_json(value),
        }),
        Err(e) => json!({
            "object": object.to_string(),
            "property": args.property,
            "index": args.index,
            "failure": error_to_json(*e),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
