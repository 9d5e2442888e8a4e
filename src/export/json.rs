use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Write any serializable value as pretty JSON
pub fn export_json<T, P>(data: &T, output_path: P) -> Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let json_data = serde_json::to_string_pretty(data)?;

    let mut file = std::fs::File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;
    file.write_all(b"\n")?;

    Ok(())
}

/// Read a JSON document written by the web layer or by `export_json`
pub fn import_json<T, P>(input_path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let content = std::fs::read_to_string(input_path)?;
    Ok(serde_json::from_str(&content)?)
}
