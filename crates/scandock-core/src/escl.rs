//! eSCL request documents and response token checks.
//!
//! Feeder detection is a plain substring search over the capability and status
//! documents rather than a schema parse. Both checks are advisory: a miss only
//! changes the default input source or skips one auto-scan tick.

use quick_xml::escape::escape;

use crate::models::ScanSettings;

pub const SCAN_NAMESPACE: &str = "http://schemas.hp.com/imaging/escl/2011/05/03";
pub const PWG_NAMESPACE: &str = "http://www.pwg.org/schemas/2010/12/sm";
pub const ESCL_VERSION: &str = "2.0";

/// Path segments under the scanner's eSCL root.
pub const SCANNER_STATUS_PATH: &str = "ScannerStatus";
pub const SCANNER_CAPABILITIES_PATH: &str = "ScannerCapabilities";
pub const SCAN_JOBS_PATH: &str = "ScanJobs";

const ADF_CAPABILITY_TOKENS: [&str; 2] = ["Adf", "ADF"];
const ADF_LOADED_TOKENS: [&str; 2] = ["AdfLoaded", "MediaLoaded"];

impl ScanSettings {
    /// Render the `scan:ScanSettings` document posted to `ScanJobs`.
    ///
    /// Output depends only on the settings, so equal settings give byte-identical XML.
    pub fn to_escl_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<scan:ScanSettings xmlns:scan="{scan_ns}" xmlns:pwg="{pwg_ns}">
    <pwg:Version>{version}</pwg:Version>
    <scan:Intent>{intent}</scan:Intent>
    <pwg:ScanRegions>
        <pwg:ScanRegion>
            <pwg:XOffset>0</pwg:XOffset>
            <pwg:YOffset>0</pwg:YOffset>
            <pwg:Width>{width}</pwg:Width>
            <pwg:Height>{height}</pwg:Height>
        </pwg:ScanRegion>
    </pwg:ScanRegions>
    <pwg:InputSource>{source}</pwg:InputSource>
    <scan:DocumentFormatExt>{format}</scan:DocumentFormatExt>
    <scan:XResolution>{resolution}</scan:XResolution>
    <scan:YResolution>{resolution}</scan:YResolution>
    <scan:ColorMode>{color_mode}</scan:ColorMode>
</scan:ScanSettings>"#,
            scan_ns = SCAN_NAMESPACE,
            pwg_ns = PWG_NAMESPACE,
            version = ESCL_VERSION,
            intent = self.intent,
            width = self.region_width,
            height = self.region_height,
            source = self.input_source,
            format = escape(self.document_format.as_str()),
            resolution = self.resolution_dpi,
            color_mode = self.color_mode,
        )
    }
}

/// Whether a `ScannerCapabilities` document mentions a document feeder.
pub fn capabilities_report_adf(capabilities: &str) -> bool {
    ADF_CAPABILITY_TOKENS
        .iter()
        .any(|token| capabilities.contains(token))
}

/// Whether a `ScannerStatus` document reports paper in the feeder.
pub fn status_reports_adf_loaded(status: &str) -> bool {
    ADF_LOADED_TOKENS.iter().any(|token| status.contains(token))
}
