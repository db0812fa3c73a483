use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

// Accepted spellings for a submitted start_time. Datetime-local inputs post
// the T-separated forms, plain text inputs the space-separated ones.
const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime, AppError> {
    for format in START_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    Err(AppError::Validation(format!("unrecognized start_time: {}", raw)))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/* ---------- search ---------- */

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchForm {
    // May be absent or empty; the empty prefix matches every row.
    #[serde(default)]
    pub search_term: String,
}

/* ---------- venues ---------- */

// Raw url-encoded venue submission. Checkbox semantics: the seeking_talent
// key's presence means checked, whatever its value.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct VenueForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120))]
    pub state: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub image_link: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub website: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub facebook_link: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

/// Validated venue payload ready for persistence.
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub talent_description: Option<String>,
}

impl VenueForm {
    // The name as submitted, for user-facing notices even when invalid.
    pub fn display_name(&self) -> String {
        self.name.trim().to_string()
    }

    pub fn into_command(self) -> Result<NewVenue, AppError> {
        self.validate()?;

        let seeking_talent = self.seeking_talent.is_some();
        // An unchecked box clears the description, stray submissions included.
        let talent_description = if seeking_talent {
            self.seeking_description.and_then(non_empty)
        } else {
            None
        };

        Ok(NewVenue {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            address: non_empty(self.address),
            phone: non_empty(self.phone),
            image_link: non_empty(self.image_link),
            website: non_empty(self.website),
            facebook_link: non_empty(self.facebook_link),
            seeking_talent,
            talent_description,
        })
    }
}

/* ---------- artists ---------- */

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct ArtistForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 120))]
    pub state: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub genres: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub image_link: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub website: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub facebook_link: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub venue_description: Option<String>,
}

impl ArtistForm {
    pub fn display_name(&self) -> String {
        self.name.trim().to_string()
    }

    pub fn into_command(self) -> Result<NewArtist, AppError> {
        self.validate()?;

        let seeking_venue = self.seeking_venue.is_some();
        let venue_description = if seeking_venue {
            self.seeking_description.and_then(non_empty)
        } else {
            None
        };

        Ok(NewArtist {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            phone: non_empty(self.phone),
            genres: non_empty(self.genres),
            image_link: non_empty(self.image_link),
            website: non_empty(self.website),
            facebook_link: non_empty(self.facebook_link),
            seeking_venue,
            venue_description,
        })
    }
}

/* ---------- shows ---------- */

// Ids arrive as text fields and are parsed here rather than by the
// extractor, so a bad id surfaces as a validation failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct ShowForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub artist_id: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub venue_id: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub start_time: String,
}

#[derive(Debug, Clone)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

impl ShowForm {
    pub fn into_command(self) -> Result<NewShow, AppError> {
        self.validate()?;

        let artist_id = self
            .artist_id
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation("artist_id must be an integer".to_string()))?;
        let venue_id = self
            .venue_id
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation("venue_id must be an integer".to_string()))?;
        let start_time = parse_start_time(self.start_time.trim())?;

        Ok(NewShow { artist_id, venue_id, start_time })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn venue_checkbox_presence_means_seeking() {
        let form: VenueForm = serde_urlencoded::from_str(
            "name=The+Fillmore&city=San+Francisco&state=CA&seeking_talent=y\
             &seeking_description=Looking+for+local+acts",
        )
        .unwrap();

        let venue = form.into_command().unwrap();
        assert!(venue.seeking_talent);
        assert_eq!(venue.talent_description.as_deref(), Some("Looking for local acts"));
    }

    #[test]
    fn venue_checkbox_on_value_also_counts() {
        let form: VenueForm =
            serde_urlencoded::from_str("name=The+Chapel&city=San+Francisco&state=CA&seeking_talent=on")
                .unwrap();

        assert!(form.into_command().unwrap().seeking_talent);
    }

    #[test]
    fn unchecked_box_clears_stray_description() {
        let form: VenueForm = serde_urlencoded::from_str(
            "name=The+Fillmore&city=San+Francisco&state=CA&seeking_description=stray+text",
        )
        .unwrap();

        let venue = form.into_command().unwrap();
        assert!(!venue.seeking_talent);
        assert_eq!(venue.talent_description, None);
    }

    #[test]
    fn missing_name_is_a_validation_error() {
        let form: VenueForm = serde_urlencoded::from_str("city=San+Francisco&state=CA").unwrap();

        match form.into_command() {
            Err(AppError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other.map(|v| v.name)),
        }
    }

    #[test]
    fn blank_optional_fields_become_null() {
        let form: VenueForm = serde_urlencoded::from_str(
            "name=The+Fillmore&city=San+Francisco&state=CA&phone=&website=++",
        )
        .unwrap();

        let venue = form.into_command().unwrap();
        assert_eq!(venue.phone, None);
        assert_eq!(venue.website, None);
        assert_eq!(venue.address, None);
    }

    #[test]
    fn artist_form_mirrors_venue_semantics() {
        let form: ArtistForm = serde_urlencoded::from_str(
            "name=Guns+N+Petals&city=San+Francisco&state=CA&genres=Rock+n+Roll\
             &seeking_venue=y&seeking_description=Play+anywhere",
        )
        .unwrap();

        let artist = form.into_command().unwrap();
        assert!(artist.seeking_venue);
        assert_eq!(artist.venue_description.as_deref(), Some("Play anywhere"));
        assert_eq!(artist.genres.as_deref(), Some("Rock n Roll"));
    }

    #[test]
    fn show_form_parses_ids_and_timestamp() {
        let form: ShowForm = serde_urlencoded::from_str(
            "artist_id=4&venue_id=7&start_time=2026-09-01T20%3A00",
        )
        .unwrap();

        let show = form.into_command().unwrap();
        assert_eq!(show.artist_id, 4);
        assert_eq!(show.venue_id, 7);
        assert_eq!(show.start_time, parse_start_time("2026-09-01 20:00").unwrap());
    }

    #[test]
    fn show_form_rejects_non_numeric_ids() {
        let form = ShowForm {
            artist_id: "four".to_string(),
            venue_id: "7".to_string(),
            start_time: "2026-09-01 20:00:00".to_string(),
        };

        assert!(matches!(form.into_command(), Err(AppError::Validation(_))));
    }

    #[test]
    fn start_time_accepts_common_spellings() {
        for raw in [
            "2026-09-01 20:00:00",
            "2026-09-01T20:00:00",
            "2026-09-01 20:00",
            "2026-09-01T20:00",
        ] {
            assert!(parse_start_time(raw).is_ok(), "rejected {}", raw);
        }
    }

    #[test]
    fn start_time_rejects_garbage() {
        for raw in ["next tuesday", "2026-99-01 20:00:00", ""] {
            assert!(parse_start_time(raw).is_err(), "accepted {}", raw);
        }
    }

    proptest! {
        // Whatever the stray description says, an unchecked box clears it.
        #[test]
        fn unchecked_seeking_always_clears_description(stray in ".{0,64}") {
            let form = VenueForm {
                name: "The Fillmore".to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                seeking_talent: None,
                seeking_description: Some(stray),
                ..VenueForm::default()
            };

            let venue = form.into_command().unwrap();
            prop_assert!(!venue.seeking_talent);
            prop_assert!(venue.talent_description.is_none());
        }
    }
}
