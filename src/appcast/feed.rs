//! Appcast rendering and output.
//!
//! The template is plain handlebars over the release record; strict mode
//! turns a placeholder with no matching field into a render error, so a
//! half-filled feed can never be written.

use super::release::ReleaseInfo;
use crate::error::Result;
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Template context; field names are the placeholder names.
#[derive(Debug, Serialize)]
struct FeedContext<'a> {
    app_name: &'a str,
    version: &'a str,
    build_number: &'a str,
    date: &'a str,
    min_system_version: &'a str,
    dmg_name: &'a str,
    length: u64,
    dsa_signature: &'a str,
}

/// Publication date in RFC 2822 format, local time.
pub fn publication_date() -> String {
    chrono::Local::now().to_rfc2822()
}

/// Substitute the release record into the template.
pub fn render(template: &str, info: &ReleaseInfo, date: &str) -> Result<String> {
    let context = FeedContext {
        app_name: &info.app_name,
        version: &info.version,
        build_number: &info.build_number,
        date,
        min_system_version: &info.min_system_version,
        dmg_name: &info.dmg_name,
        length: info.dmg_size,
        dsa_signature: info.signature.as_deref().unwrap_or_default(),
    };

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    Ok(handlebars.render_template(template, &context)?)
}

/// Write the rendered feed: the beta feed always, the stable feed only for
/// non-prerelease versions. Returns the paths written.
pub fn write_feeds(
    output_dir: &Path,
    stable_name: &str,
    beta_name: &str,
    rendered: &str,
    prerelease: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let beta_path = output_dir.join(beta_name);
    std::fs::write(&beta_path, rendered)?;
    written.push(beta_path);

    if !prerelease {
        let stable_path = output_dir.join(stable_name);
        std::fs::write(&stable_path, rendered)?;
        written.push(stable_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\
<item>
  <title>{{app_name}} {{version}}</title>
  <pubDate>{{date}}</pubDate>
  <sparkle:minimumSystemVersion>{{min_system_version}}</sparkle:minimumSystemVersion>
  <enclosure url=\"https://example.com/{{dmg_name}}\"
    sparkle:version=\"{{build_number}}\"
    sparkle:shortVersionString=\"{{version}}\"
    sparkle:dsaSignature=\"{{dsa_signature}}\"
    length=\"{{length}}\"
    type=\"application/octet-stream\"/>
</item>
";

    fn base_info() -> ReleaseInfo {
        ReleaseInfo {
            app_name: "NAMEsentinel".into(),
            version: "9.9.9".into(),
            build_number: "777".into(),
            min_system_version: "10.13".into(),
            dmg_name: "IMAGEsentinel.dmg".into(),
            dmg_size: 123456,
            prerelease: false,
            signature: Some("SIGsentinel".into()),
        }
    }

    #[test]
    fn every_placeholder_is_substituted() {
        let out = render(TEMPLATE, &base_info(), "Sun, 14 Jan 2018 12:00:00 +0900").unwrap();
        assert!(out.contains("NAMEsentinel 9.9.9"));
        assert!(out.contains("Sun, 14 Jan 2018 12:00:00 +0900"));
        assert!(out.contains("sparkle:version=\"777\""));
        assert!(out.contains("IMAGEsentinel.dmg"));
        assert!(out.contains("length=\"123456\""));
        assert!(out.contains("sparkle:dsaSignature=\"SIGsentinel\""));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn substitution_is_injective_per_field() {
        // Changing one input field changes exactly the corresponding
        // substring of the rendered output and nothing else.
        let date = "Sun, 14 Jan 2018 12:00:00 +0900";
        let base = render(TEMPLATE, &base_info(), date).unwrap();

        let mut changed = base_info();
        changed.app_name = "OTHERname".into();
        let out = render(TEMPLATE, &changed, date).unwrap();
        assert_eq!(out, base.replace("NAMEsentinel", "OTHERname"));

        let mut changed = base_info();
        changed.version = "8.8.8".into();
        let out = render(TEMPLATE, &changed, date).unwrap();
        assert_eq!(out, base.replace("9.9.9", "8.8.8"));

        let mut changed = base_info();
        changed.build_number = "778".into();
        let out = render(TEMPLATE, &changed, date).unwrap();
        assert_eq!(out, base.replace("777", "778"));

        let mut changed = base_info();
        changed.dmg_size = 654321;
        let out = render(TEMPLATE, &changed, date).unwrap();
        assert_eq!(out, base.replace("123456", "654321"));

        let mut changed = base_info();
        changed.min_system_version = "11.0".into();
        let out = render(TEMPLATE, &changed, date).unwrap();
        assert_eq!(out, base.replace("10.13", "11.0"));
    }

    #[test]
    fn unknown_placeholder_is_a_render_error() {
        let err = render("{{no_such_field}}", &base_info(), "date").unwrap_err();
        assert!(err.to_string().contains("template"));
    }

    #[test]
    fn stable_release_writes_both_feeds() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_feeds(
            dir.path(),
            "appcast.xml",
            "appcast-beta.xml",
            "<rss/>",
            false,
        )
        .unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.path().join("appcast-beta.xml").exists());
        assert!(dir.path().join("appcast.xml").exists());
    }

    #[test]
    fn prerelease_writes_only_the_beta_feed() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_feeds(
            dir.path(),
            "appcast.xml",
            "appcast-beta.xml",
            "<rss/>",
            true,
        )
        .unwrap();

        assert_eq!(written.len(), 1);
        assert!(dir.path().join("appcast-beta.xml").exists());
        assert!(!dir.path().join("appcast.xml").exists());
    }
}
