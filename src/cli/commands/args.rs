//! CLI command for `iarchain args`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{is_json, print_json};
use crate::core::args::ArgSerializer;

/// Execute the args command
///
/// The rendered line goes to stdout even in quiet mode; it is the output.
pub fn execute(serializer: &ArgSerializer, response_file: Option<&Path>, args: Vec<String>) -> Result<()> {
    let rendered = match response_file {
        Some(file) => serializer.to_response_file(args, file)?,
        None => args,
    };

    if is_json() {
        print_json(&serde_json::json!({
            "status": "success",
            "style": serializer.style(),
            "args": rendered,
            "command_line": serializer.render(&rendered),
        }));
    } else {
        println!("{}", serializer.render(&rendered));
    }
    Ok(())
}
