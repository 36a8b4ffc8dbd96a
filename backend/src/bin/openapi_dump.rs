//! Print the carelink OpenAPI document as pretty JSON.

use std::io::{self, Write};

use carelink::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|err| io::Error::other(err.to_string()))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
}
