use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ClassifyError, ClassifyResult};
use crate::license::catalog::License;

/// Supplies the reference text of each catalog license.
pub trait ReferenceSource: Send + Sync {
    /// Load the reference text of `license`, split into lines.
    fn load(&self, license: License) -> ClassifyResult<Vec<String>>;
}

/// Split text into lines, accepting both `\n` and `\r\n` endings.
pub fn to_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}

/// Reference texts compiled into the binary from `licenses/<slug>.txt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledTexts;

impl BundledTexts {
    pub fn text(license: License) -> &'static str {
        match license {
            License::Afl3_0 => include_str!("../../licenses/afl-3.0.txt"),
            License::Apache2_0 => include_str!("../../licenses/apache-2.0.txt"),
            License::Artistic2_0 => include_str!("../../licenses/artistic-2.0.txt"),
            License::Bsl1_0 => include_str!("../../licenses/bsl-1.0.txt"),
            License::Bsd2Clause => include_str!("../../licenses/bsd-2-clause.txt"),
            License::Bsd3Clause => include_str!("../../licenses/bsd-3-clause.txt"),
            License::Bsd3ClauseClear => include_str!("../../licenses/bsd-3-clause-clear.txt"),
            License::Cc0_1_0 => include_str!("../../licenses/cc0-1.0.txt"),
            License::CcBy4_0 => include_str!("../../licenses/cc-by-4.0.txt"),
            License::CcBySa4_0 => include_str!("../../licenses/cc-by-sa-4.0.txt"),
            License::Wtfpl => include_str!("../../licenses/wtfpl.txt"),
            License::Ecl2_0 => include_str!("../../licenses/ecl-2.0.txt"),
            License::Epl1_0 => include_str!("../../licenses/epl-1.0.txt"),
            License::Epl2_0 => include_str!("../../licenses/epl-2.0.txt"),
            License::Eupl1_1 => include_str!("../../licenses/eupl-1.1.txt"),
            License::Agpl3_0 => include_str!("../../licenses/agpl-3.0.txt"),
            License::Gpl1_0 => include_str!("../../licenses/gpl-1.0.txt"),
            License::Gpl2_0 => include_str!("../../licenses/gpl-2.0.txt"),
            License::Gpl3_0 => include_str!("../../licenses/gpl-3.0.txt"),
            License::Lgpl2_1 => include_str!("../../licenses/lgpl-2.1.txt"),
            License::Lgpl3_0 => include_str!("../../licenses/lgpl-3.0.txt"),
            License::Isc => include_str!("../../licenses/isc.txt"),
            License::Lppl1_3c => include_str!("../../licenses/lppl-1.3c.txt"),
            License::MsPl => include_str!("../../licenses/ms-pl.txt"),
            License::Mit => include_str!("../../licenses/mit.txt"),
            License::Mpl2_0 => include_str!("../../licenses/mpl-2.0.txt"),
            License::Osl3_0 => include_str!("../../licenses/osl-3.0.txt"),
            License::PostgreSql => include_str!("../../licenses/postgresql.txt"),
            License::Ofl1_1 => include_str!("../../licenses/ofl-1.1.txt"),
            License::Ncsa => include_str!("../../licenses/ncsa.txt"),
            License::Unlicense => include_str!("../../licenses/unlicense.txt"),
            License::Zlib => include_str!("../../licenses/zlib.txt"),
        }
    }
}

impl ReferenceSource for BundledTexts {
    fn load(&self, license: License) -> ClassifyResult<Vec<String>> {
        Ok(to_lines(Self::text(license)))
    }
}

/// Reference texts read from `<root>/<slug>.txt` on every load.
///
/// A missing file is a [`ClassifyError::MissingReference`]; the bundled texts
/// are not consulted.
#[derive(Debug, Clone)]
pub struct DirectoryTexts {
    root: PathBuf,
}

impl DirectoryTexts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, license: License) -> PathBuf {
        self.root.join(format!("{}.txt", license.slug()))
    }
}

impl ReferenceSource for DirectoryTexts {
    fn load(&self, license: License) -> ClassifyResult<Vec<String>> {
        let path = self.path_of(license);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(to_lines(&String::from_utf8_lossy(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ClassifyError::MissingReference {
                slug: license.slug().to_string(),
            }),
            Err(source) => Err(ClassifyError::Reference { path, source }),
        }
    }
}
