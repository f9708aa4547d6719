use std::io::Cursor;

use crate::driver::{Config, Driver};
use crate::engine::{TransformEngine, Validator, is_passthrough};
use crate::error::Error;
use crate::messages::Messages;
use crate::{TransformResult, ValidationResult};

/// Result of running the driver over an in-memory script.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// The transformed script (header line included), or empty in
    /// validate-only mode.
    pub output: String,
    /// Everything the run wrote to the stats stream: change rows and
    /// rendered findings.
    pub report: String,
    /// The exit code the binary would have used.
    pub exit_code: i32,
}

/// Transform `script` with the default configuration.
///
/// # Example
/// ```
/// use usacloud_update::update;
///
/// let out = update("usacloud iso-image list\n").unwrap();
/// assert!(out.output.contains("usacloud cdrom list"));
/// ```
pub fn update(script: &str) -> Result<UpdateOutcome, Error> {
    update_with(script, &Config::default())
}

/// Transform (or validate) `script` with an explicit configuration.
pub fn update_with(script: &str, config: &Config) -> Result<UpdateOutcome, Error> {
    let mut driver = Driver::new(config.clone());
    let mut output: Vec<u8> = Vec::new();
    let mut stats_out: Vec<u8> = Vec::new();
    let exit_code =
        driver.drive(&mut Cursor::new(script.as_bytes()), &mut output, &mut stats_out)?;

    // The driver only ever writes UTF-8.
    let output = String::from_utf8(output).expect("driver output is UTF-8");
    let report = String::from_utf8(stats_out).expect("driver report is UTF-8");
    Ok(UpdateOutcome { output, report, exit_code })
}

/// Run the rule pipeline over a single line.
pub fn transform_line(line: &str) -> TransformResult {
    TransformEngine::new().apply(line)
}

/// Validate every line of `script` without transforming anything. Lines with
/// no findings are absent from the result.
pub fn validate_script(script: &str, config: &Config) -> Result<Vec<ValidationResult>, Error> {
    let messages = Messages::new(config.language);
    let validator = Validator::new(&messages);
    let mut results = Vec::new();
    for (idx, line) in script.lines().enumerate() {
        if is_passthrough(line) {
            continue;
        }
        if let Some(result) = validator.validate(line, idx + 1) {
            results.push(result);
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Mode;
    use crate::messages::Language;

    #[test]
    fn update_transforms_and_reports() {
        let out = update("usacloud server list --output-type=csv\n").unwrap();
        assert_eq!(out.exit_code, 0);
        assert!(out.output.contains("--output-type=json"));
        assert!(out.report.contains("[output-type-csv-tsv]"));
    }

    #[test]
    fn update_with_validate_only_leaves_output_empty() {
        let config = Config { mode: Mode::ValidateOnly, language: Language::En, ..Config::default() };
        let out = update_with("usacloud serv list\n", &config).unwrap();
        assert!(out.output.is_empty());
        assert_eq!(out.exit_code, 1);
        assert!(out.report.contains("unknown command: serv"));
    }

    #[test]
    fn transform_line_matches_engine_behavior() {
        let res = transform_line("usacloud startup-script list");
        assert!(res.changed);
        assert!(res.line_after.starts_with("usacloud note list"));
    }

    #[test]
    fn validate_script_numbers_lines_from_one() {
        let config = Config { language: Language::En, ..Config::default() };
        let script = "# heading\nusacloud server list\nusacloud serv list\n";
        let results = validate_script(script, &config).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].line_no, 3);
    }
}
