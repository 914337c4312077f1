//! Import/export driver over the bulk and dump formats.
//!
//! Bulk import/export are generic over `io::Read`/`io::Write` with
//! path-taking wrappers on top, so codecs can be exercised against
//! in-memory buffers. Directory import merges by record ID; bulk import is
//! a pure append.

use crate::codec::{self, ParsePolicy, RawAccount, RawFavorite, RawPayment, RecordKind};
use crate::error::{LedgerError, Result};
use crate::ledger::{Ledger, MergeOutcome};
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::Path;

impl Ledger {
    /// Encodes all accounts into one `|`-terminated bulk stream.
    pub fn export_bulk<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = codec::bulk_writer(writer);
        for account in self.accounts() {
            writer.serialize(RawAccount::from_account(account))?;
        }
        writer.flush()?;

        debug!("exported {} accounts in bulk format", self.accounts().len());
        Ok(())
    }

    /// Writes the bulk account stream to `path`, replacing any previous
    /// contents.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.export_bulk(file)
    }

    /// Decodes a bulk account stream and appends every record.
    ///
    /// Integer parsing is unconditionally strict here: the first bad field
    /// aborts the import. There is no dedup against existing accounts and
    /// the ID counter is left alone, so importing into a non-empty ledger
    /// can produce duplicate IDs.
    pub fn import_bulk<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut reader = codec::bulk_reader(reader);
        let mut imported = 0usize;

        for (idx, result) in reader.deserialize::<RawAccount>().enumerate() {
            let raw: RawAccount = result?;
            let account = raw.into_account(ParsePolicy::Strict).map_err(|source| {
                LedgerError::InvalidRecord {
                    kind: RecordKind::Account,
                    record: idx + 1,
                    source,
                }
            })?;
            self.append_account(account);
            imported += 1;
        }

        debug!("imported {} accounts in bulk format", imported);
        Ok(())
    }

    /// Reads the bulk account stream from `path` and appends every record.
    pub fn import_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path)?;
        self.import_bulk(BufReader::new(file))
    }

    /// Appends every in-memory record to the per-kind dump files inside
    /// `dir`, creating the directory if absent.
    ///
    /// Dump files are opened in append mode: earlier contents are kept and
    /// new lines land after them. Import's merge-by-ID collapses the
    /// duplicates this produces on re-export.
    pub fn export<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut writer = append_dump_writer(dir, RecordKind::Account)?;
        for account in self.accounts() {
            writer.serialize(RawAccount::from_account(account))?;
        }
        writer.flush()?;
        debug!("exported {} accounts to {}", self.accounts().len(), dir.display());

        let mut writer = append_dump_writer(dir, RecordKind::Payment)?;
        for payment in self.payments() {
            writer.serialize(RawPayment::from_payment(payment))?;
        }
        writer.flush()?;
        debug!("exported {} payments to {}", self.payments().len(), dir.display());

        let mut writer = append_dump_writer(dir, RecordKind::Favorite)?;
        for favorite in self.favorites() {
            writer.serialize(RawFavorite::from_favorite(favorite))?;
        }
        writer.flush()?;
        debug!("exported {} favorites to {}", self.favorites().len(), dir.display());

        Ok(())
    }

    /// Directory import with the default (lenient) parse policy.
    pub fn import<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        self.import_with(dir, ParsePolicy::default())
    }

    /// Lists `dir` and merges every record of every recognized dump file.
    ///
    /// Entries whose names are not one of the three fixed dump names are
    /// skipped. A directory that cannot be listed or a file that cannot be
    /// opened aborts the import; integer field failures follow `policy`.
    pub fn import_with<P: AsRef<Path>>(&mut self, dir: P, policy: ParsePolicy) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let kind = match name.to_str().and_then(RecordKind::from_dump_file) {
                Some(kind) => kind,
                None => {
                    debug!("skipping non-dump entry {:?}", name);
                    continue;
                }
            };

            let file = File::open(entry.path())?;
            self.import_dump(BufReader::new(file), kind, policy)?;
        }
        Ok(())
    }

    /// Merges one dump stream of the given kind into the ledger.
    fn import_dump<R: Read>(&mut self, reader: R, kind: RecordKind, policy: ParsePolicy) -> Result<()> {
        let mut reader = codec::dump_reader(reader);
        let mut created = 0usize;
        let mut updated = 0usize;

        let mut tally = |outcome: MergeOutcome| match outcome {
            MergeOutcome::Created => created += 1,
            MergeOutcome::Updated => updated += 1,
        };

        match kind {
            RecordKind::Account => {
                for (idx, result) in reader.deserialize::<RawAccount>().enumerate() {
                    let raw: RawAccount = result?;
                    let record = raw
                        .into_account(policy)
                        .map_err(|source| invalid_record(kind, idx, source))?;
                    tally(self.merge_account(record));
                }
            }
            RecordKind::Payment => {
                for (idx, result) in reader.deserialize::<RawPayment>().enumerate() {
                    let raw: RawPayment = result?;
                    let record = raw
                        .into_payment(policy)
                        .map_err(|source| invalid_record(kind, idx, source))?;
                    tally(self.merge_payment(record));
                }
            }
            RecordKind::Favorite => {
                for (idx, result) in reader.deserialize::<RawFavorite>().enumerate() {
                    let raw: RawFavorite = result?;
                    let record = raw
                        .into_favorite(policy)
                        .map_err(|source| invalid_record(kind, idx, source))?;
                    tally(self.merge_favorite(record));
                }
            }
        }

        debug!("imported {} records: {} created, {} updated", kind, created, updated);
        Ok(())
    }
}

fn append_dump_writer(dir: &Path, kind: RecordKind) -> Result<csv::Writer<File>> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(dir.join(kind.dump_file()))?;
    Ok(codec::dump_writer(file))
}

fn invalid_record(kind: RecordKind, idx: usize, source: codec::DecodeError) -> LedgerError {
    LedgerError::InvalidRecord {
        kind,
        record: idx + 1,
        source,
    }
}
