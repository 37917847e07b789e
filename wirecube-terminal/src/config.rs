/// Demo settings and the `key = value` settings file parser
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0, u32 as integer},
    combinator::{all_consuming, map_opt, rest},
    number::complete::float,
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};
use thiserror::Error;
use wirecube_core::{Color, Vector3};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("line {line}: expected `key = value`, found {text:?}")]
    Syntax { line: usize, text: String },
    #[error("line {line}: unknown setting `{key}`")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid value {value:?} for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
    #[error("`{key}` must be {requirement}")]
    OutOfRange {
        key: &'static str,
        requirement: &'static str,
    },
}

/// Everything the demo lets you tune
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Radians of rotation per pixel of mouse drag
    pub sensitivity: f32,
    pub fps: u32,
    pub cube_size: Vector3,
    pub camera_position: Vector3,
    pub fov_degrees: f32,
    pub edge_color: Color,
    pub vertex_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: 0.01,
            fps: 60,
            cube_size: Vector3::new(2.0, 2.0, 2.0),
            camera_position: Vector3::new(2.0, 2.0, 4.0),
            fov_degrees: 45.0,
            edge_color: Color::RED,
            vertex_color: Color::BLUE,
        }
    }
}

impl Settings {
    /// Read and parse a settings file. Keys missing from the file keep
    /// their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded settings file {}", path.display());
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let (key, value) = match all_consuming(entry)(content) {
                Ok((_, (key, value))) => (key, value.trim()),
                Err(_) => {
                    return Err(ConfigError::Syntax {
                        line,
                        text: content.to_string(),
                    })
                }
            };
            settings.apply(line, key, value)?;
            debug!("setting {} = {}", key, value);
        }

        settings.validate()?;
        Ok(settings)
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "sensitivity" => self.sensitivity = parse_value(line, key, value, float)?,
            "fps" => self.fps = parse_value(line, key, value, integer)?,
            "cube_size" => self.cube_size = parse_value(line, key, value, triple)?,
            "camera_position" => self.camera_position = parse_value(line, key, value, triple)?,
            "fov_degrees" => self.fov_degrees = parse_value(line, key, value, float)?,
            "edge_color" => self.edge_color = parse_value(line, key, value, color)?,
            "vertex_color" => self.vertex_color = parse_value(line, key, value, color)?,
            _ => {
                return Err(ConfigError::UnknownKey {
                    line,
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Check ranges after the file and command line have been applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.cube_size;
        let position = self.camera_position;

        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(out_of_range("sensitivity", "a positive number"));
        }
        if self.fps == 0 {
            return Err(out_of_range("fps", "at least 1"));
        }
        if ![size.x, size.y, size.z].iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(out_of_range("cube_size", "three positive numbers"));
        }
        if ![position.x, position.y, position.z].iter().all(|v| v.is_finite()) {
            return Err(out_of_range("camera_position", "three finite numbers"));
        }
        // The camera looks at the origin with +Y up, so it cannot sit on the Y axis
        if position.x.abs() <= f32::EPSILON && position.z.abs() <= f32::EPSILON {
            return Err(out_of_range("camera_position", "off the vertical axis"));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(out_of_range("fov_degrees", "between 0 and 180"));
        }
        Ok(())
    }
}

fn out_of_range(key: &'static str, requirement: &'static str) -> ConfigError {
    ConfigError::OutOfRange { key, requirement }
}

fn parse_value<'a, T, P>(line: usize, key: &str, value: &'a str, parser: P) -> Result<T, ConfigError>
where
    P: FnMut(&'a str) -> IResult<&'a str, T>,
{
    all_consuming(parser)(value)
        .map(|(_, parsed)| parsed)
        .map_err(|_| ConfigError::InvalidValue {
            line,
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn entry(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(key, delimited(space0, char('='), space0), rest)(input)
}

fn key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0)(input)
}

fn triple(input: &str) -> IResult<&str, Vector3> {
    let (input, (x, y, z)) = tuple((float, preceded(comma, float), preceded(comma, float)))(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

fn color(input: &str) -> IResult<&str, Color> {
    map_opt(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '-'),
        Color::from_name,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sensitivity, 0.01);
        assert_eq!(settings.fps, 60);
    }

    #[test]
    fn test_parse_all_keys() {
        let text = "\
# drag tuning
sensitivity = 0.02
fps=30

cube_size = 1, 2.5 ,3   # not a cube
camera_position = 0, 0, 6
fov_degrees = 60
edge_color = cyan
vertex_color = dark_gray
";
        let settings = Settings::parse(text).unwrap();
        assert_eq!(settings.sensitivity, 0.02);
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.cube_size, Vector3::new(1.0, 2.5, 3.0));
        assert_eq!(settings.camera_position, Vector3::new(0.0, 0.0, 6.0));
        assert_eq!(settings.fov_degrees, 60.0);
        assert_eq!(settings.edge_color, Color::CYAN);
        assert_eq!(settings.vertex_color, Color::DARK_GRAY);
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = Settings::parse("fps = 30\nsensitivity 0.5\n").unwrap_err();
        match err {
            ConfigError::Syntax { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "sensitivity 0.5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = Settings::parse("gravity = 9.8").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey { line: 1, ref key } if key == "gravity"));
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            "fps = fast",
            "fps = 30.5",
            "cube_size = 1, 2",
            "edge_color = mauve",
            "sensitivity = 0.01 rad",
        ];
        for text in cases {
            let err = Settings::parse(text).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { line: 1, .. }),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn test_out_of_range_values() {
        let cases = [
            ("sensitivity = 0", "sensitivity"),
            ("fps = 0", "fps"),
            ("cube_size = 1, -1, 1", "cube_size"),
            ("camera_position = 0, 0, 0", "camera_position"),
            ("fov_degrees = 180", "fov_degrees"),
        ];
        for (text, expected) in cases {
            match Settings::parse(text) {
                Err(ConfigError::OutOfRange { key, .. }) => assert_eq!(key, expected),
                other => panic!("{text}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_camera_on_vertical_axis_is_rejected() {
        for text in ["camera_position = 0, 6, 0", "camera_position = 0, -3, 0"] {
            match Settings::parse(text) {
                Err(ConfigError::OutOfRange { key, requirement }) => {
                    assert_eq!(key, "camera_position");
                    assert_eq!(requirement, "off the vertical axis");
                }
                other => panic!("{text}: unexpected {other:?}"),
            }
        }
        assert!(Settings::parse("camera_position = 0.5, 6, 0").is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/wirecube.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/wirecube.conf"));
    }
}
