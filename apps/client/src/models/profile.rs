use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The single user profile kept by the backend.
///
/// Unknown columns are carried through untouched so a get-modify-put never drops them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Sets a known field by name, or stores it in `extra`.
    pub fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "name" => &mut self.name,
            "city_country" => &mut self.city_country,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "linkedin_url" => &mut self.linkedin_url,
            "github_url" => &mut self.github_url,
            "portfolio_url" => &mut self.portfolio_url,
            _ => {
                self.extra.insert(key.to_string(), Value::String(value));
                return;
            }
        };
        *slot = Some(value);
    }
}

/// Write payload: only the editable columns, never ids or timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_platforms_json: Option<&'a Value>,
}

impl<'a> From<&'a Profile> for ProfileUpdate<'a> {
    fn from(p: &'a Profile) -> Self {
        Self {
            name: p.name.as_deref(),
            city_country: p.city_country.as_deref(),
            email: p.email.as_deref(),
            phone: p.phone.as_deref(),
            linkedin_url: p.linkedin_url.as_deref(),
            github_url: p.github_url.as_deref(),
            portfolio_url: p.portfolio_url.as_deref(),
            other_platforms_json: p.extra.get("other_platforms_json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_profile_parses() {
        let profile: Profile = serde_json::from_value(json!({})).unwrap();
        assert!(profile.name.is_none());
    }

    #[test]
    fn test_update_drops_ids_and_timestamps() {
        let mut profile: Profile = serde_json::from_value(json!({
            "id": 1,
            "name": "Ada",
            "created_at": "2024-01-01 00:00:00",
            "other_platforms_json": "{\"kaggle\": \"ada\"}"
        }))
        .unwrap();
        profile.set("email", "ada@example.com".to_string());

        let body = serde_json::to_value(ProfileUpdate::from(&profile)).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "other_platforms_json": "{\"kaggle\": \"ada\"}"
            })
        );
    }
}
