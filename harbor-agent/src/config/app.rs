use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct App {
    pub(super) name: String,
    pub(super) tails_dir: String,
}

impl App {
    pub fn get_name(&self) -> String {
        self.name.to_owned()
    }

    pub fn get_tails_dir(&self) -> String {
        self.tails_dir.to_owned()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            tails_dir: "/tmp/harbor-tails".to_string(),
        }
    }
}

impl ToValidate for App {
    fn validate(&self) -> Result<(), CommonError> {
        if self.name.is_empty() {
            return Err(CommonError::ValidationError(
                "config: app:name is missing".to_string(),
            ));
        }

        if self.tails_dir.is_empty() {
            return Err(CommonError::ValidationError(
                "config: app:tails_dir is missing".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use rstdev_config::format::use_toml;
    use rstdev_config::parser::from_file;
    use rstdev_config::{types::ConfigError, Builder};

    use crate::common::helpers;

    #[test]
    fn test_parse_app_config() -> Result<(), ConfigError> {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("src/config/fixtures");

        let toml_file = format!("{}/config_app.toml", path.display());
        let config_toml = {
            let config_builder: Result<App, ConfigError> =
                Builder::new(from_file(toml_file)).fetch()?.parse(use_toml);

            config_builder
        };

        assert!(!config_toml.is_err());

        let config_app = config_toml.unwrap();
        assert_eq!(config_app.name, "faber".to_string());
        assert_eq!(config_app.tails_dir, "/tmp/harbor-tails".to_string());
        Ok(())
    }

    #[test]
    fn test_app_validation_failed() {
        let app = App::default();
        let validation = helpers::validate(app);
        assert!(validation.is_err());
        assert!(validation.unwrap_err().to_string().contains("app:name"));
    }
}
