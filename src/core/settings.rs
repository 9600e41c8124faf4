//! Settings business logic - Key-value storage for the language and school identity.
//!
//! Values live in the `settings` table. Missing keys fall back to the `[school]`
//! section of the configuration file. Changing a setting never touches any other
//! collection: switching language only changes how labels render.

use crate::{
    config::school::AppConfig,
    entities::{Setting, SettingColumn, setting},
    errors::Result,
    i18n::Language,
};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info, instrument};

/// Key of the UI language setting
pub const LANGUAGE_KEY: &str = "language";
/// Key of the school name printed on documents
pub const SCHOOL_NAME_KEY: &str = "school_name";
/// Key of the school address printed on documents
pub const SCHOOL_ADDRESS_KEY: &str = "school_address";

/// Current values of every setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolSettings {
    /// Language of replies and printed documents
    pub language: Language,
    /// Printed in the header of receipts and files
    pub school_name: String,
    /// Printed under the school name
    pub school_address: String,
}

/// Retrieves a value from the settings table, `None` when the key was never set.
#[instrument(skip(db))]
pub async fn get_setting(db: &DatabaseConnection, key: &str) -> Result<Option<String>> {
    let value = Setting::find()
        .filter(SettingColumn::Key.eq(key))
        .one(db)
        .await?
        .map(|s| s.value);
    debug!("Setting '{}': {:?}", key, value);
    Ok(value)
}

/// Inserts or replaces a setting.
#[instrument(skip(db))]
pub async fn set_setting(db: &DatabaseConnection, key: &str, value: &str) -> Result<()> {
    let now = chrono::Utc::now().naive_utc();
    let existing = Setting::find()
        .filter(SettingColumn::Key.eq(key))
        .one(db)
        .await?;

    match existing {
        Some(model) => {
            let mut active_model: setting::ActiveModel = model.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(db).await?;
        }
        None => {
            setting::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }
    info!("Set setting: {} = {}", key, value);
    Ok(())
}

/// Writes the configured defaults for every key that has no value yet.
pub async fn initialize_defaults(db: &DatabaseConnection, config: &AppConfig) -> Result<()> {
    let defaults = [
        (LANGUAGE_KEY, config.school.default_language.code().to_string()),
        (SCHOOL_NAME_KEY, config.school.name.clone()),
        (SCHOOL_ADDRESS_KEY, config.school.address.clone()),
    ];
    for (key, value) in defaults {
        if get_setting(db, key).await?.is_none() {
            set_setting(db, key, &value).await?;
        }
    }
    Ok(())
}

/// Current language. An unreadable stored value falls back to the default.
pub async fn get_language(db: &DatabaseConnection) -> Result<Language> {
    Ok(get_setting(db, LANGUAGE_KEY)
        .await?
        .and_then(|code| code.parse().ok())
        .unwrap_or_default())
}

/// Stores the interface language. No other collection is touched.
pub async fn set_language(db: &DatabaseConnection, language: Language) -> Result<()> {
    set_setting(db, LANGUAGE_KEY, language.code()).await
}

/// Updates the school name and/or address. Empty input leaves a value unchanged.
pub async fn set_school_identity(
    db: &DatabaseConnection,
    name: Option<&str>,
    address: Option<&str>,
) -> Result<()> {
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        set_setting(db, SCHOOL_NAME_KEY, name).await?;
    }
    if let Some(address) = address.map(str::trim).filter(|a| !a.is_empty()) {
        set_setting(db, SCHOOL_ADDRESS_KEY, address).await?;
    }
    Ok(())
}

/// Reads every setting, using `config` for keys never written.
pub async fn load_settings(db: &DatabaseConnection, config: &AppConfig) -> Result<SchoolSettings> {
    let language = match get_setting(db, LANGUAGE_KEY).await? {
        Some(code) => code.parse().unwrap_or(config.school.default_language),
        None => config.school.default_language,
    };
    Ok(SchoolSettings {
        language,
        school_name: get_setting(db, SCHOOL_NAME_KEY)
            .await?
            .unwrap_or_else(|| config.school.name.clone()),
        school_address: get_setting(db, SCHOOL_ADDRESS_KEY)
            .await?
            .unwrap_or_else(|| config.school.address.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::seed::load_seed;
    use crate::core::{finance, instructor, lesson, seed::seed_if_empty, student, vehicle};
    use crate::entities::StudentDocument;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_set_and_get_new_key() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(get_setting(&db, "missing").await?, None);
        set_setting(&db, SCHOOL_NAME_KEY, "Auto-école Najah").await?;
        assert_eq!(
            get_setting(&db, SCHOOL_NAME_KEY).await?.as_deref(),
            Some("Auto-école Najah")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_update_existing_key() -> Result<()> {
        let db = setup_test_db().await?;
        set_language(&db, Language::French).await?;
        set_language(&db, Language::Arabic).await?;
        assert_eq!(get_language(&db).await?, Language::Arabic);
        assert_eq!(Setting::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_defaults_do_not_overwrite() -> Result<()> {
        let db = setup_test_db().await?;
        let config = AppConfig::default();
        set_language(&db, Language::French).await?;
        initialize_defaults(&db, &config).await?;

        let settings = load_settings(&db, &config).await?;
        assert_eq!(settings.language, Language::French);
        assert_eq!(settings.school_name, config.school.name);
        Ok(())
    }

    type Snapshot = (
        Vec<crate::entities::StudentModel>,
        Vec<crate::entities::StudentDocumentModel>,
        Vec<crate::entities::InstructorModel>,
        Vec<crate::entities::VehicleModel>,
        Vec<crate::entities::LessonModel>,
        Vec<crate::entities::PaymentModel>,
        Vec<crate::entities::ExpenseModel>,
    );

    async fn snapshot(db: &DatabaseConnection) -> Result<Snapshot> {
        Ok((
            student::get_all_students(db).await?,
            StudentDocument::find().all(db).await?,
            instructor::get_all_instructors(db).await?,
            vehicle::get_all_vehicles(db).await?,
            lesson::get_all_lessons(db).await?,
            finance::get_all_payments(db).await?,
            finance::get_all_expenses(db).await?,
        ))
    }

    #[tokio::test]
    async fn test_switching_language_leaves_records_untouched() -> Result<()> {
        let db = setup_test_db().await?;
        seed_if_empty(&db, load_seed()?).await?;
        let before = snapshot(&db).await?;
        assert!(!before.0.is_empty() && !before.1.is_empty() && !before.4.is_empty());

        set_language(&db, Language::French).await?;
        assert_eq!(snapshot(&db).await?, before);
        set_language(&db, Language::Arabic).await?;
        assert_eq!(snapshot(&db).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_identity_is_ignored() -> Result<()> {
        let db = setup_test_db().await?;
        set_school_identity(&db, Some("Najah"), Some("Rabat")).await?;
        set_school_identity(&db, Some("  "), None).await?;
        assert_eq!(get_setting(&db, SCHOOL_NAME_KEY).await?.as_deref(), Some("Najah"));
        assert_eq!(get_setting(&db, SCHOOL_ADDRESS_KEY).await?.as_deref(), Some("Rabat"));
        Ok(())
    }
}
