use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Site title shown in the main layout
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// Address the HTTP server binds to
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Number of articles per listing page
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    #[serde(default)]
    pub wartawan: Vec<WartawanConfig>,
    #[serde(default)]
    pub articles: Vec<ArticleConfig>,
}

fn default_site_name() -> String {
    "Portal Berita".to_string()
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_per_page() -> i64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct WartawanConfig {
    pub nama: String,
}

/// Seed article, inserted once by title.
#[derive(Debug, Deserialize, Clone)]
pub struct ArticleConfig {
    pub judul: String,
    /// Name of a `[[wartawan]]` entry
    pub wartawan: String,
    pub isi: String,
    /// RFC 3339 or `YYYY-MM-DD HH:MM:SS`; defaults to the time of seeding
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.per_page <= 0 {
            anyhow::bail!("per_page must be positive, got {}", self.per_page);
        }

        let mut names = HashSet::new();
        for wartawan in &self.wartawan {
            if !names.insert(wartawan.nama.as_str()) {
                anyhow::bail!("duplicate wartawan '{}'", wartawan.nama);
            }
        }

        for article in &self.articles {
            if !names.contains(article.wartawan.as_str()) {
                anyhow::bail!(
                    "article '{}' refers to unknown wartawan '{}'",
                    article.judul,
                    article.wartawan
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        assert_eq!(default_site_name(), "Portal Berita");
        assert_eq!(default_listen(), "0.0.0.0:3000");
        assert_eq!(default_per_page(), 10);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            site_name = "Kabar Kota"
            per_page = 5

            [[wartawan]]
            nama = "Budi Santoso"

            [[wartawan]]
            nama = "Siti Aminah"

            [[articles]]
            judul = "Banjir di Jakarta"
            wartawan = "Siti Aminah"
            isi = "<p>Hujan deras sejak pagi.</p>"
            created_at = "2024-03-05T08:00:00Z"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.site_name, "Kabar Kota");
        assert_eq!(config.listen, "0.0.0.0:3000");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.wartawan.len(), 2);
        assert_eq!(config.wartawan[1].nama, "Siti Aminah");
        assert_eq!(config.articles.len(), 1);
        assert_eq!(config.articles[0].wartawan, "Siti Aminah");
        assert_eq!(
            config.articles[0].created_at.as_deref(),
            Some("2024-03-05T08:00:00Z")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();

        assert_eq!(config.site_name, "Portal Berita");
        assert_eq!(config.per_page, 10);
        assert!(config.wartawan.is_empty());
        assert!(config.articles.is_empty());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/berita.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_article_missing_required_fields() {
        let content = r#"
            [[wartawan]]
            nama = "Budi"

            [[articles]]
            judul = "Tanpa isi"
            wartawan = "Budi"
        "#;

        let result = Config::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_article_created_at_is_optional() {
        let content = r#"
            [[wartawan]]
            nama = "Budi"

            [[articles]]
            judul = "Judul"
            wartawan = "Budi"
            isi = "<p>isi</p>"
        "#;

        let config = Config::from_str(content).unwrap();
        assert!(config.articles[0].created_at.is_none());
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_zero_per_page_rejected() {
            let err = Config::from_str("per_page = 0").unwrap_err();
            assert!(err.to_string().contains("per_page"));
        }

        #[test]
        fn test_duplicate_wartawan_rejected() {
            let content = r#"
                [[wartawan]]
                nama = "Budi"

                [[wartawan]]
                nama = "Budi"
            "#;

            let err = Config::from_str(content).unwrap_err();
            assert!(err.to_string().contains("duplicate wartawan"));
        }

        #[test]
        fn test_unknown_article_wartawan_rejected() {
            let content = r#"
                [[wartawan]]
                nama = "Budi"

                [[articles]]
                judul = "Judul"
                wartawan = "Andi"
                isi = "<p>isi</p>"
            "#;

            let err = Config::from_str(content).unwrap_err();
            assert!(err.to_string().contains("unknown wartawan 'Andi'"));
        }
    }
}
