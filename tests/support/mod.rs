//! Fixture builders shared by the integration suite: in-memory AAS and
//! BatchML documents plus zip containers in the shapes the library accepts.

use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const AAS_NS: &str = "http://www.admin-shell.io/aas/2/0";
pub const B2MML_NS: &str = "http://www.mesa.org/xml/B2MML";

/// One asset document with a single shell identity and the given
/// capabilities. `None` for an IRI leaves the capability without a
/// `semanticId` block.
pub fn asset_document(shell_id: &str, capabilities: &[(&str, Option<&str>)]) -> String {
    let mut body = String::new();
    for (short, iri) in capabilities {
        body.push_str("<aas:capability>");
        body.push_str(&format!("<aas:idShort>{short}</aas:idShort>"));
        if let Some(iri) = iri {
            body.push_str(&format!(
                "<aas:semanticId><aas:keys><aas:key>{iri}</aas:key></aas:keys></aas:semanticId>"
            ));
        }
        body.push_str("</aas:capability>");
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <aas:aasenv xmlns:aas=\"{AAS_NS}\">\
         <aas:assetAdministrationShells>\
         <aas:assetAdministrationShell>\
         <aas:identification>{shell_id}</aas:identification>\
         </aas:assetAdministrationShell>\
         </aas:assetAdministrationShells>\
         <aas:submodels><aas:submodel><aas:submodelElements>{body}</aas:submodelElements></aas:submodel></aas:submodels>\
         </aas:aasenv>"
    )
}

/// One general-recipe document; each entry is a (process id, value-string)
/// pair carried in a semantic-description block.
pub fn recipe_document(requirements: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (process_id, value) in requirements {
        body.push_str(&format!(
            "<b2mml:ProcessElement>\
             <b2mml:ID>{process_id}</b2mml:ID>\
             <b2mml:OtherInformation>\
             <b2mml:OtherInfoID>SemanticDescription</b2mml:OtherInfoID>\
             <b2mml:OtherValue><b2mml:ValueString>{value}</b2mml:ValueString></b2mml:OtherValue>\
             </b2mml:OtherInformation>\
             </b2mml:ProcessElement>"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <b2mml:GRecipe xmlns:b2mml=\"{B2MML_NS}\">{body}</b2mml:GRecipe>"
    )
}

/// A plain zip archive of named members.
pub fn zip_archive(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in members {
        writer.start_file(*name, options).expect("start zip member");
        writer.write_all(content).expect("write zip member");
    }
    writer
        .finish()
        .expect("finish zip archive")
        .into_inner()
}

/// A minimal AASX package: OPC manifest, origin part, one aas-spec document,
/// and the given supplementary files.
pub fn aasx_package(asset_xml: &str, supplementary: &[(&str, &[u8])]) -> Vec<u8> {
    let package_rels = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Type=\"http://www.admin-shell.io/aasx/relationships/aasx-origin\" \
         Target=\"/aasx/aasx-origin\" Id=\"r0\"/>\
         </Relationships>";
    let origin_rels = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Type=\"http://www.admin-shell.io/aasx/relationships/aas-spec\" \
         Target=\"/aasx/data.xml\" Id=\"r1\"/>\
         </Relationships>";
    let content_types = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"xml\" ContentType=\"text/xml\"/>\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         </Types>";

    let mut members: Vec<(&str, &[u8])> = vec![
        ("[Content_Types].xml", content_types.as_bytes()),
        ("_rels/.rels", package_rels.as_bytes()),
        ("aasx/aasx-origin", b""),
        ("aasx/_rels/aasx-origin.rels", origin_rels.as_bytes()),
        ("aasx/data.xml", asset_xml.as_bytes()),
    ];
    members.extend_from_slice(supplementary);
    zip_archive(&members)
}
