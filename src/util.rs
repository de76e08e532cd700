//! Small utility helpers used across modules.

/// Grade filters arrive as "2", "중2", "중 2" or "2학년"; the store keeps the
/// bare number. Values without any digit are passed through trimmed.
pub fn normalize_grade(input: &str) -> String {
  let v = input.trim();
  let digits: String = v
    .chars()
    .skip_while(|c| !c.is_ascii_digit())
    .take_while(|c| c.is_ascii_digit())
    .collect();
  if digits.is_empty() { v.to_string() } else { digits }
}

/// Subject filters: "영어" / "English" / "ENGLISH" -> "english".
pub fn normalize_subject(input: &str) -> String {
  let v = input.trim().to_lowercase();
  match v.as_str() {
    "영어" => "english".into(),
    "수학" => "math".into(),
    "국어" => "korean".into(),
    "과학" => "science".into(),
    _ => v,
  }
}
