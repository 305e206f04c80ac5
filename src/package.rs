//! Packaged-asset (AASX/OPC) unpacking and plain archive reading.
//!
//! An AASX package is a zip container whose object graph is described by OPC
//! relationship parts: the package manifest (`_rels/.rels`) names the
//! `aasx-origin` part, and the origin's own relationships name the XML parts
//! holding the asset description. Unpacking reads that graph into an
//! in-memory store plus a supplementary-file container, then serializes the
//! store back out as the single-document dialect the asset extractor expects.
//!
//! The package bytes are staged to a temporary file while the archive is
//! open; the staged copy is removed on every exit path, including failures
//! mid-parse. The external contract stays bytes in, bytes out.

use crate::asset::{self, EquipmentDescriptor};
use crate::dialect::{self, Dialect};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::ZipArchive;

const PACKAGE_RELS_PART: &str = "_rels/.rels";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const ORIGIN_RELATIONSHIP: &str = "http://www.admin-shell.io/aasx/relationships/aasx-origin";
const SPEC_RELATIONSHIP: &str = "http://www.admin-shell.io/aasx/relationships/aas-spec";
/// Synthetic root each flattened part hangs under. The parts keep their own
/// root elements and namespace declarations, so qualified lookups behave as
/// on a standalone document.
const FLATTENED_ROOT: &str = "aasenv";

/// Result of unpacking one package: the flattened asset document plus every
/// embedded supplementary file (thumbnails, PDFs, ...), keyed by part name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackageContents {
    pub document: String,
    pub supplementary: BTreeMap<String, Vec<u8>>,
}

/// Unpack a packaged asset document, staging in the system temp directory.
pub fn unpack(bytes: &[u8]) -> Result<PackageContents> {
    unpack_in(bytes, &std::env::temp_dir())
}

/// Same as [`unpack`] with an explicit staging directory.
///
/// The staged copy is removed on every exit path; tests snapshot the staging
/// directory around failure cases to hold the unpacker to that contract.
pub fn unpack_in(bytes: &[u8], staging_dir: &Path) -> Result<PackageContents> {
    let mut staged = NamedTempFile::new_in(staging_dir)
        .map_err(|err| Error::container(format!("staging package: {err}")))?;
    staged
        .write_all(bytes)
        .map_err(|err| Error::container(format!("staging package: {err}")))?;
    let reopened = staged
        .reopen()
        .map_err(|err| Error::container(format!("staging package: {err}")))?;
    let mut archive = ZipArchive::new(reopened)
        .map_err(|err| Error::container(format!("not a readable zip archive: {err}")))?;
    read_package(&mut archive)
    // `staged` drops here and unlinks the staging file on every path.
}

/// Unpack a package and run the asset extractor over its flattened document.
pub fn extract_packaged_descriptor(bytes: &[u8]) -> Result<EquipmentDescriptor> {
    let contents = unpack(bytes)?;
    asset::extract_descriptor(&contents.document)
}

/// Read a plain zip archive of standalone asset documents, as uploaded for
/// multi-candidate matching: member name to member bytes, deterministic
/// order. Directory entries are skipped.
pub fn read_archive(bytes: &[u8]) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| Error::container(format!("not a readable zip archive: {err}")))?;
    let mut members = BTreeMap::new();
    for index in 0..archive.len() {
        let mut member = archive
            .by_index(index)
            .map_err(|err| Error::container(format!("archive member {index} unreadable: {err}")))?;
        if member.is_dir() {
            continue;
        }
        let name = member.name().to_string();
        let mut content = Vec::new();
        member
            .read_to_end(&mut content)
            .map_err(|err| Error::container(format!("archive member '{name}' unreadable: {err}")))?;
        members.insert(name, content);
    }
    Ok(members)
}

fn read_package<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<PackageContents> {
    let manifest = read_part_string(archive, PACKAGE_RELS_PART)?;
    let origin_target = relationship_targets(&manifest, ORIGIN_RELATIONSHIP)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::container("package manifest declares no aasx-origin part"))?;
    let origin_part = resolve_target("", &origin_target);

    let origin_rels = read_part_string(archive, &rels_part_for(&origin_part))?;
    let spec_parts: Vec<String> = relationship_targets(&origin_rels, SPEC_RELATIONSHIP)?
        .into_iter()
        .map(|target| resolve_target(parent_dir(&origin_part), &target))
        .collect();
    if spec_parts.is_empty() {
        return Err(Error::container(
            "package declares no asset description part",
        ));
    }

    let mut documents = Vec::with_capacity(spec_parts.len());
    for part in &spec_parts {
        documents.push(read_part_string(archive, part)?);
    }

    // Everything outside the package bookkeeping and the asset documents
    // rides along as an embedded supplementary file.
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let mut supplementary = BTreeMap::new();
    for name in names {
        if name == CONTENT_TYPES_PART
            || name == origin_part
            || is_rels_part(&name)
            || spec_parts.contains(&name)
            || name.ends_with('/')
        {
            continue;
        }
        let mut part = archive
            .by_name(&name)
            .map_err(|err| Error::container(format!("package part '{name}' unreadable: {err}")))?;
        let mut content = Vec::new();
        part.read_to_end(&mut content)
            .map_err(|err| Error::container(format!("package part '{name}' unreadable: {err}")))?;
        supplementary.insert(name, content);
    }

    Ok(PackageContents {
        document: flatten_documents(&documents)?,
        supplementary,
    })
}

fn read_part_string<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut part = archive
        .by_name(name)
        .map_err(|err| Error::container(format!("package part '{name}' unreadable: {err}")))?;
    let mut text = String::new();
    part.read_to_string(&mut text)
        .map_err(|err| Error::container(format!("package part '{name}' is not UTF-8 text: {err}")))?;
    Ok(text)
}

/// Targets of every relationship of the requested type, in document order.
fn relationship_targets(rels_xml: &str, relationship_type: &str) -> Result<Vec<String>> {
    let doc = dialect::parse(rels_xml)
        .map_err(|err| Error::container(format!("relationship part unreadable: {err}")))?;
    let mut targets = Vec::new();
    for relationship in
        dialect::find_all_descendants(doc.root(), Dialect::PackageManifest, "Relationship")
    {
        if relationship.attribute("Type") != Some(relationship_type) {
            continue;
        }
        if let Some(target) = relationship.attribute("Target") {
            targets.push(target.to_string());
        }
    }
    Ok(targets)
}

/// OPC part names are zip paths without a leading slash; relationship targets
/// may be package-absolute (`/aasx/data.xml`) or relative to the part that
/// declared them.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if base_dir.is_empty() {
        target.to_string()
    } else {
        format!("{base_dir}/{target}")
    }
}

/// Relationship part describing `part_name`, per the OPC layout convention.
fn rels_part_for(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part_name}.rels"),
    }
}

fn parent_dir(part_name: &str) -> &str {
    part_name.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn is_rels_part(name: &str) -> bool {
    name.split('/').any(|segment| segment == "_rels")
}

/// Serialize the package's asset documents back out as one single-document
/// tree. Each part's event stream is copied verbatim (minus its XML
/// declaration) under the synthetic wrapper root.
fn flatten_documents(documents: &[String]) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    write_event(&mut writer, Event::Start(BytesStart::new(FLATTENED_ROOT)))?;
    for document in documents {
        let mut reader = Reader::from_str(document);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Decl(_)) => {}
                Ok(event) => write_event(&mut writer, event)?,
                Err(err) => {
                    return Err(Error::container(format!(
                        "asset part is not well-formed XML: {err}"
                    )));
                }
            }
        }
    }
    write_event(&mut writer, Event::End(BytesEnd::new(FLATTENED_ROOT)))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|err| Error::container(format!("flattened document is not UTF-8: {err}")))
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|err| Error::container(format!("serializing flattened document: {err}")))
}
