//! Declarative form validation.
//!
//! Each form validates against an ordered rule list per field and reports
//! the first violated constraint for that field. All checks run locally,
//! before any remote call is attempted.

use crate::ports::images::ImageFile;

/// A single violated constraint, attributed to its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), Vec<FieldError>>;

/// Maximum accepted size for a post image attachment.
pub const MAX_POST_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Maximum accepted size for an avatar attachment.
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

// Rule primitives. Each returns the violation message, or None if satisfied.

fn required(value: &str, label: &str) -> Option<String> {
    value.trim().is_empty().then(|| format!("{label} is required"))
}

fn min_len(value: &str, min: usize, label: &str) -> Option<String> {
    (value.chars().count() < min)
        .then(|| format!("{label} must be at least {min} characters"))
}

fn max_len(value: &str, max: usize, label: &str) -> Option<String> {
    (value.chars().count() > max)
        .then(|| format!("{label} must be at most {max} characters"))
}

fn email_format(value: &str) -> Option<String> {
    let well_formed = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    (!well_formed).then(|| "Email address is not valid".to_string())
}

fn http_url(value: &str) -> Option<String> {
    let ok = url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    (!ok).then(|| "Image URL is not valid".to_string())
}

/// Record the first failing rule for a field, skipping the rest.
fn check(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    rules: impl IntoIterator<Item = Option<String>>,
) {
    if let Some(message) = rules.into_iter().flatten().next() {
        errors.push(FieldError::new(field, message));
    }
}

fn finish(errors: Vec<FieldError>) -> ValidationResult {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Login form.
pub struct LoginForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

pub fn validate_login(form: &LoginForm<'_>) -> ValidationResult {
    let mut errors = Vec::new();
    check(
        &mut errors,
        "email",
        [required(form.email, "Email"), email_format(form.email)],
    );
    check(
        &mut errors,
        "password",
        [
            required(form.password, "Password"),
            min_len(form.password, 6, "Password"),
        ],
    );
    finish(errors)
}

/// Registration form, including the cross-field confirmation check.
pub struct RegisterForm<'a> {
    pub display_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

pub fn validate_register(form: &RegisterForm<'_>) -> ValidationResult {
    let mut errors = Vec::new();
    check(
        &mut errors,
        "display_name",
        [
            required(form.display_name, "Display name"),
            min_len(form.display_name, 2, "Display name"),
            max_len(form.display_name, 50, "Display name"),
        ],
    );
    check(
        &mut errors,
        "email",
        [required(form.email, "Email"), email_format(form.email)],
    );
    check(
        &mut errors,
        "password",
        [
            required(form.password, "Password"),
            min_len(form.password, 6, "Password"),
            max_len(form.password, 100, "Password"),
        ],
    );
    check(
        &mut errors,
        "confirm_password",
        [
            required(form.confirm_password, "Password confirmation"),
            (form.password != form.confirm_password)
                .then(|| "Password confirmation does not match".to_string()),
        ],
    );
    finish(errors)
}

/// Post authoring/editing form. `tags` is the raw comma-separated input.
pub struct PostForm<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub category_id: &'a str,
    pub tags: &'a str,
    pub image_url: Option<&'a str>,
}

pub fn validate_post(form: &PostForm<'_>) -> ValidationResult {
    let mut errors = Vec::new();
    check(
        &mut errors,
        "title",
        [
            required(form.title, "Title"),
            min_len(form.title, 5, "Title"),
            max_len(form.title, 200, "Title"),
        ],
    );
    check(
        &mut errors,
        "content",
        [
            required(form.content, "Content"),
            min_len(form.content, 50, "Content"),
        ],
    );
    check(
        &mut errors,
        "category_id",
        [required(form.category_id, "Category")],
    );
    check(&mut errors, "tags", [required(form.tags, "At least one tag")]);
    if let Some(image_url) = form.image_url
        && !image_url.is_empty()
    {
        check(&mut errors, "image_url", [http_url(image_url)]);
    }
    finish(errors)
}

/// Category form (admin).
pub struct CategoryForm<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

pub fn validate_category(form: &CategoryForm<'_>) -> ValidationResult {
    let mut errors = Vec::new();
    check(
        &mut errors,
        "name",
        [
            required(form.name, "Name"),
            min_len(form.name, 2, "Name"),
            max_len(form.name, 50, "Name"),
        ],
    );
    check(
        &mut errors,
        "description",
        [max_len(form.description, 200, "Description")],
    );
    finish(errors)
}

/// Profile editing form.
pub struct ProfileForm<'a> {
    pub display_name: &'a str,
    pub bio: &'a str,
}

pub fn validate_profile(form: &ProfileForm<'_>) -> ValidationResult {
    let mut errors = Vec::new();
    check(
        &mut errors,
        "display_name",
        [
            required(form.display_name, "Display name"),
            min_len(form.display_name, 2, "Display name"),
            max_len(form.display_name, 50, "Display name"),
        ],
    );
    check(&mut errors, "bio", [max_len(form.bio, 500, "Bio")]);
    finish(errors)
}

/// Password change form. The current password is re-verified against the
/// stored hash by the caller before any change is applied.
pub struct PasswordChangeForm<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
    pub confirm_password: &'a str,
}

pub fn validate_password_change(form: &PasswordChangeForm<'_>) -> ValidationResult {
    let mut errors = Vec::new();
    check(
        &mut errors,
        "current_password",
        [required(form.current_password, "Current password")],
    );
    check(
        &mut errors,
        "new_password",
        [
            required(form.new_password, "New password"),
            min_len(form.new_password, 6, "New password"),
            max_len(form.new_password, 100, "New password"),
        ],
    );
    check(
        &mut errors,
        "confirm_password",
        [
            required(form.confirm_password, "Password confirmation"),
            (form.new_password != form.confirm_password)
                .then(|| "Password confirmation does not match".to_string()),
        ],
    );
    finish(errors)
}

/// Turn raw comma-separated tag input into the stored tag list:
/// trimmed, empties dropped, deduplicated preserving first occurrence.
/// Applied at submission time, not at input time.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',') {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Check an image attachment locally before any upload is attempted.
pub fn validate_image(image: &ImageFile, max_bytes: usize) -> Result<(), FieldError> {
    if !image.content_type.starts_with("image/") {
        return Err(FieldError::new("image", "File must be an image"));
    }
    if image.bytes.len() > max_bytes {
        return Err(FieldError::new(
            "image",
            format!("Image must be at most {} MB", max_bytes / (1024 * 1024)),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_reports_first_violation_per_field() {
        let result = validate_login(&LoginForm {
            email: "",
            password: "abc",
        });
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Email is required");
        assert_eq!(errors[1].field, "password");
        assert!(errors[1].message.contains("at least 6"));
    }

    #[test]
    fn login_rejects_malformed_email() {
        let result = validate_login(&LoginForm {
            email: "not-an-email",
            password: "secret1",
        });
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn register_rejects_mismatched_confirmation() {
        let result = validate_register(&RegisterForm {
            display_name: "Alice",
            email: "alice@example.com",
            password: "secret1",
            confirm_password: "secret2",
        });
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm_password");
        assert!(errors[0].message.contains("does not match"));
    }

    #[test]
    fn register_accepts_valid_input() {
        assert!(
            validate_register(&RegisterForm {
                display_name: "Alice",
                email: "alice@example.com",
                password: "secret1",
                confirm_password: "secret1",
            })
            .is_ok()
        );
    }

    #[test]
    fn post_title_and_content_bounds() {
        let long_title = "t".repeat(201);
        let result = validate_post(&PostForm {
            title: &long_title,
            content: "short",
            category_id: "",
            tags: "",
            image_url: None,
        });
        let errors = result.unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "content", "category_id", "tags"]);
        assert!(errors[0].message.contains("at most 200"));
        assert!(errors[1].message.contains("at least 50"));
    }

    #[test]
    fn post_image_url_must_be_http() {
        let content = "c".repeat(60);
        let result = validate_post(&PostForm {
            title: "A valid title",
            content: &content,
            category_id: "some-id",
            tags: "rust",
            image_url: Some("ftp://example.com/pic.png"),
        });
        let errors = result.unwrap_err();
        assert_eq!(errors[0].field, "image_url");

        // Empty string means "no image" and passes.
        assert!(
            validate_post(&PostForm {
                title: "A valid title",
                content: &content,
                category_id: "some-id",
                tags: "rust",
                image_url: Some(""),
            })
            .is_ok()
        );
    }

    #[test]
    fn profile_bio_limit() {
        let long_bio = "b".repeat(501);
        let result = validate_profile(&ProfileForm {
            display_name: "Alice",
            bio: &long_bio,
        });
        assert_eq!(result.unwrap_err()[0].field, "bio");
    }

    #[test]
    fn password_change_requires_current_and_matching_confirmation() {
        let result = validate_password_change(&PasswordChangeForm {
            current_password: "",
            new_password: "newpass",
            confirm_password: "other",
        });
        let errors = result.unwrap_err();
        assert_eq!(errors[0].field, "current_password");
        assert_eq!(errors[1].field, "confirm_password");
    }

    #[test]
    fn tags_parsed_trimmed_deduplicated_in_order() {
        assert_eq!(
            parse_tags(" rust, web , rust,, ,tools"),
            vec!["rust", "web", "tools"]
        );
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn oversized_image_rejected_locally() {
        let image = ImageFile {
            file_name: "big.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0u8; 6 * 1024 * 1024],
        };
        let err = validate_image(&image, MAX_POST_IMAGE_BYTES).unwrap_err();
        assert!(err.message.contains("5 MB"));

        // The same file is also too large for an avatar.
        assert!(validate_image(&image, MAX_AVATAR_BYTES).is_err());
    }

    #[test]
    fn non_image_mime_rejected() {
        let file = ImageFile {
            file_name: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(validate_image(&file, MAX_POST_IMAGE_BYTES).is_err());
    }

    #[test]
    fn small_image_accepted() {
        let image = ImageFile {
            file_name: "ok.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0u8; 1024],
        };
        assert!(validate_image(&image, MAX_AVATAR_BYTES).is_ok());
    }
}
