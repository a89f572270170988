//! Version metadata from the bundle's Info.plist.

use crate::error::{Error, Result};
use std::path::Path;

/// App metadata extracted from Info.plist
#[derive(Clone, Debug)]
pub struct AppManifest {
    /// Display name (CFBundleName)
    pub app_name: String,

    /// Short version string (CFBundleShortVersionString), e.g. "4.2.0"
    pub version: String,

    /// Build number (CFBundleVersion)
    pub build_number: String,

    /// Minimum macOS version (LSMinimumSystemVersion)
    pub min_system_version: String,
}

/// Read the manifest from `<bundle>/Contents/Info.plist`.
///
/// The manifest is a trusted build artifact: a missing key is a fatal,
/// clearly named error rather than something to recover from.
pub fn read_manifest(app_bundle: &Path) -> Result<AppManifest> {
    let plist_path = app_bundle.join("Contents").join("Info.plist");
    let value = plist::Value::from_file(&plist_path).map_err(|e| Error::Plist {
        path: plist_path.clone(),
        source: e,
    })?;

    manifest_from_value(&value, &plist_path)
}

fn manifest_from_value(value: &plist::Value, plist_path: &Path) -> Result<AppManifest> {
    let string_key = |key: &'static str| -> Result<String> {
        value
            .as_dictionary()
            .and_then(|dict| dict.get(key))
            .and_then(|v| v.as_string())
            .map(str::to_string)
            .ok_or_else(|| Error::ManifestKey {
                key,
                path: plist_path.to_path_buf(),
            })
    };

    Ok(AppManifest {
        app_name: string_key("CFBundleName")?,
        version: string_key("CFBundleShortVersionString")?,
        build_number: string_key("CFBundleVersion")?,
        min_system_version: string_key("LSMinimumSystemVersion")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn plist_value(body: &str) -> plist::Value {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
{body}
</dict>
</plist>"#
        );
        plist::Value::from_reader_xml(Cursor::new(xml.into_bytes())).unwrap()
    }

    const FULL: &str = r#"
    <key>CFBundleName</key><string>MyApp</string>
    <key>CFBundleShortVersionString</key><string>4.2.0</string>
    <key>CFBundleVersion</key><string>512</string>
    <key>LSMinimumSystemVersion</key><string>10.13</string>
    "#;

    #[test]
    fn extracts_the_four_fixed_keys() {
        let manifest =
            manifest_from_value(&plist_value(FULL), Path::new("Info.plist")).unwrap();
        assert_eq!(manifest.app_name, "MyApp");
        assert_eq!(manifest.version, "4.2.0");
        assert_eq!(manifest.build_number, "512");
        assert_eq!(manifest.min_system_version, "10.13");
    }

    #[test]
    fn missing_key_names_the_key() {
        let body = r#"
        <key>CFBundleName</key><string>MyApp</string>
        <key>CFBundleShortVersionString</key><string>4.2.0</string>
        <key>CFBundleVersion</key><string>512</string>
        "#;
        let err =
            manifest_from_value(&plist_value(body), Path::new("Info.plist")).unwrap_err();
        assert!(err.to_string().contains("LSMinimumSystemVersion"));
    }

    #[test]
    fn non_string_value_is_a_missing_key() {
        let body = r#"
        <key>CFBundleName</key><integer>7</integer>
        <key>CFBundleShortVersionString</key><string>4.2.0</string>
        <key>CFBundleVersion</key><string>512</string>
        <key>LSMinimumSystemVersion</key><string>10.13</string>
        "#;
        let err =
            manifest_from_value(&plist_value(body), Path::new("Info.plist")).unwrap_err();
        assert!(err.to_string().contains("CFBundleName"));
    }
}
