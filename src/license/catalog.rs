use std::fmt;
use std::path::Path;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// File names (compared case-insensitively) that may hold a project license.
pub const RECOGNIZED_FILENAMES: [&str; 4] =
    ["LICENSE", "LICENSE.txt", "LICENSE.md", "LICENSE.rst"];

const URL_BASE: &str = "https://opensource.org/licenses";

/// A concrete license the classifier can recognize.
///
/// Declaration order is the catalog order: when two licenses score the same,
/// the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum License {
    Afl3_0,
    Apache2_0,
    Artistic2_0,
    Bsl1_0,
    Bsd2Clause,
    Bsd3Clause,
    Bsd3ClauseClear,
    Cc0_1_0,
    CcBy4_0,
    CcBySa4_0,
    Wtfpl,
    Ecl2_0,
    Epl1_0,
    Epl2_0,
    Eupl1_1,
    Agpl3_0,
    Gpl1_0,
    Gpl2_0,
    Gpl3_0,
    Lgpl2_1,
    Lgpl3_0,
    Isc,
    Lppl1_3c,
    MsPl,
    Mit,
    Mpl2_0,
    Osl3_0,
    PostgreSql,
    Ofl1_1,
    Ncsa,
    Unlicense,
    Zlib,
}

/// Every concrete license, in catalog order.
pub const CATALOG: [License; 32] = [
    License::Afl3_0,
    License::Apache2_0,
    License::Artistic2_0,
    License::Bsl1_0,
    License::Bsd2Clause,
    License::Bsd3Clause,
    License::Bsd3ClauseClear,
    License::Cc0_1_0,
    License::CcBy4_0,
    License::CcBySa4_0,
    License::Wtfpl,
    License::Ecl2_0,
    License::Epl1_0,
    License::Epl2_0,
    License::Eupl1_1,
    License::Agpl3_0,
    License::Gpl1_0,
    License::Gpl2_0,
    License::Gpl3_0,
    License::Lgpl2_1,
    License::Lgpl3_0,
    License::Isc,
    License::Lppl1_3c,
    License::MsPl,
    License::Mit,
    License::Mpl2_0,
    License::Osl3_0,
    License::PostgreSql,
    License::Ofl1_1,
    License::Ncsa,
    License::Unlicense,
    License::Zlib,
];

impl License {
    /// Human-readable display name.
    pub fn name(&self) -> &'static str {
        match self {
            License::Afl3_0 => "Academic Free License v3.0",
            License::Apache2_0 => "Apache license 2.0",
            License::Artistic2_0 => "Artistic license 2.0",
            License::Bsl1_0 => "Boost Software License 1.0",
            License::Bsd2Clause => "BSD 2-clause \"Simplified\" license",
            License::Bsd3Clause => "BSD 3-clause \"New\" or \"Revised\" license",
            License::Bsd3ClauseClear => "BSD 3-clause Clear license",
            License::Cc0_1_0 => "Creative Commons Zero v1.0 Universal",
            License::CcBy4_0 => "Creative Commons Attribution 4.0",
            License::CcBySa4_0 => "Creative Commons Attribution Share Alike 4.0",
            License::Wtfpl => "Do What The F*ck You Want To Public License",
            License::Ecl2_0 => "Educational Community License v2.0",
            License::Epl1_0 => "Eclipse Public License 1.0",
            License::Epl2_0 => "Eclipse Public License 2.0",
            License::Eupl1_1 => "European Union Public License 1.1",
            License::Agpl3_0 => "GNU Affero General Public License v3.0",
            License::Gpl1_0 => "GNU General Public License v1.0",
            License::Gpl2_0 => "GNU General Public License v2.0",
            License::Gpl3_0 => "GNU General Public License v3.0",
            License::Lgpl2_1 => "GNU Lesser General Public License v2.1",
            License::Lgpl3_0 => "GNU Lesser General Public License v3.0",
            License::Isc => "ISC",
            License::Lppl1_3c => "LaTeX Project Public License v1.3c",
            License::MsPl => "Microsoft Public License",
            License::Mit => "MIT",
            License::Mpl2_0 => "Mozilla Public License 2.0",
            License::Osl3_0 => "Open Software License 3.0",
            License::PostgreSql => "PostgreSQL License",
            License::Ofl1_1 => "SIL Open Font License 1.1",
            License::Ncsa => "University of Illinois/NCSA Open Source License",
            License::Unlicense => "The Unlicense",
            License::Zlib => "zLib License",
        }
    }

    /// Short lowercase identifier; also the reference text's file stem.
    pub fn slug(&self) -> &'static str {
        match self {
            License::Afl3_0 => "afl-3.0",
            License::Apache2_0 => "apache-2.0",
            License::Artistic2_0 => "artistic-2.0",
            License::Bsl1_0 => "bsl-1.0",
            License::Bsd2Clause => "bsd-2-clause",
            License::Bsd3Clause => "bsd-3-clause",
            License::Bsd3ClauseClear => "bsd-3-clause-clear",
            License::Cc0_1_0 => "cc0-1.0",
            License::CcBy4_0 => "cc-by-4.0",
            License::CcBySa4_0 => "cc-by-sa-4.0",
            License::Wtfpl => "wtfpl",
            License::Ecl2_0 => "ecl-2.0",
            License::Epl1_0 => "epl-1.0",
            License::Epl2_0 => "epl-2.0",
            License::Eupl1_1 => "eupl-1.1",
            License::Agpl3_0 => "agpl-3.0",
            License::Gpl1_0 => "gpl-1.0",
            License::Gpl2_0 => "gpl-2.0",
            License::Gpl3_0 => "gpl-3.0",
            License::Lgpl2_1 => "lgpl-2.1",
            License::Lgpl3_0 => "lgpl-3.0",
            License::Isc => "isc",
            License::Lppl1_3c => "lppl-1.3c",
            License::MsPl => "ms-pl",
            License::Mit => "mit",
            License::Mpl2_0 => "mpl-2.0",
            License::Osl3_0 => "osl-3.0",
            License::PostgreSql => "postgresql",
            License::Ofl1_1 => "ofl-1.1",
            License::Ncsa => "ncsa",
            License::Unlicense => "unlicense",
            License::Zlib => "zlib",
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}", URL_BASE, self.slug())
    }

    /// Look up a license by slug, ignoring ASCII case.
    pub fn from_slug(slug: &str) -> Option<License> {
        CATALOG
            .iter()
            .copied()
            .find(|l| l.slug().eq_ignore_ascii_case(slug.trim()))
    }

    /// The family this license belongs to, if any.
    pub fn family(&self) -> Option<LicenseFamily> {
        LicenseFamily::ALL
            .iter()
            .copied()
            .find(|f| f.members().contains(self))
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for License {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("License", 3)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("slug", self.slug())?;
        state.serialize_field("url", &self.url())?;
        state.end()
    }
}

/// Umbrella labels for groups of related licenses.
///
/// Families have no reference text and are never classification results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LicenseFamily {
    Cc,
    Gpl,
    Lgpl,
}

impl LicenseFamily {
    pub const ALL: [LicenseFamily; 3] =
        [LicenseFamily::Cc, LicenseFamily::Gpl, LicenseFamily::Lgpl];

    pub fn name(&self) -> &'static str {
        match self {
            LicenseFamily::Cc => "Creative Commons license family",
            LicenseFamily::Gpl => "GNU General Public License family",
            LicenseFamily::Lgpl => "GNU Lesser General Public License family",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            LicenseFamily::Cc => "cc",
            LicenseFamily::Gpl => "gpl",
            LicenseFamily::Lgpl => "lgpl",
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}", URL_BASE, self.slug())
    }

    pub fn members(&self) -> &'static [License] {
        match self {
            LicenseFamily::Cc => &[License::Cc0_1_0, License::CcBy4_0, License::CcBySa4_0],
            LicenseFamily::Gpl => &[License::Gpl1_0, License::Gpl2_0, License::Gpl3_0],
            LicenseFamily::Lgpl => &[License::Lgpl2_1, License::Lgpl3_0],
        }
    }
}

impl fmt::Display for LicenseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether `name` is one of [`RECOGNIZED_FILENAMES`], ignoring case.
pub fn is_recognized_filename(name: &str) -> bool {
    RECOGNIZED_FILENAMES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Whether `path` names a recognized license file and is a regular file.
///
/// The name is checked first so that unrelated paths are never touched.
pub fn is_eligible(path: &Path) -> bool {
    let recognized = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(is_recognized_filename);
    recognized && path.is_file()
}
