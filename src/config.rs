use jsonwebtoken::Algorithm;
use serde::Deserialize;

pub const DEFAULT_NUTRITION_API_URL: &str =
    "https://trackapi.nutritionix.com/v2/natural/nutrients";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NutritionConfig {
    pub api_url: String,
    pub app_id: String,
    pub app_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub nutrition: NutritionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            algorithm: std::env::var("JWT_ALGORITHM")
                .ok()
                .and_then(|v| v.parse::<Algorithm>().ok())
                .unwrap_or(Algorithm::HS256),
            ttl_minutes: std::env::var("TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let nutrition = NutritionConfig {
            api_url: std::env::var("NUTRITION_API_URL")
                .unwrap_or_else(|_| DEFAULT_NUTRITION_API_URL.into()),
            app_id: std::env::var("NUTRITION_APP_ID")?,
            app_key: std::env::var("NUTRITION_APP_KEY")?,
        };
        Ok(Self {
            database_url,
            jwt,
            nutrition,
        })
    }
}
