use serde::de::DeserializeOwned;

/// Deserialize YAML (or JSON) with the failing field path in the message.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = serde_yaml::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at {path} → {}", err.into_inner()))
        }
    }
}
