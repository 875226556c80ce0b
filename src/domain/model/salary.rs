use serde::Deserialize;

/// A salary as it arrives over the wire: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Number(f64),
    Text(String),
}

impl SalaryInput {
    pub fn into_value(self) -> Result<f64, String> {
        match self {
            SalaryInput::Number(n) if n.is_finite() => Ok(n),
            SalaryInput::Number(n) => Err(format!("salario inválido: {}", n)),
            SalaryInput::Text(s) => parse_salary(&s),
        }
    }
}

/// Parses a salary from text, e.g. a multipart field or a path segment.
pub fn parse_salary(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("salario inválido: '{}'", raw)),
    }
}
