#[derive(Debug, Clone)]
pub struct Theme {
    pub font_family: String,
    pub text_color: String,
    pub background: String,
}

impl Theme {
    /// Matplotlib-like defaults: DejaVu Sans, black text on white.
    pub fn classic() -> Self {
        Self {
            font_family: "\"DejaVu Sans\", Verdana, Arial, sans-serif".to_string(),
            text_color: "#000000".to_string(),
            background: "#ffffff".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            text_color: "#1c2430".to_string(),
            background: "#ffffff".to_string(),
        }
    }

    /// First concrete family name, for rasterizers that want a single default.
    pub fn primary_family(&self) -> &str {
        self.font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .find(|part| !part.is_empty())
            .unwrap_or("sans-serif")
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
