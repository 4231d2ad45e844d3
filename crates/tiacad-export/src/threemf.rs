//! 3MF export (spec.md §4.8): a multi-material 3MF archive built directly
//! as a ZIP, the way `vcad-slicer-bambu` builds its own `3D/3dmodel.model`
//! archive — hand-formatted XML strings written through a `zip::ZipWriter`,
//! no XML-builder crate.

use std::io::Write;
use std::path::Path;

use tiacad_geom::GeometryBackend;
use tiacad_material::{Color, Material};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{ExportError, ExportErrorKind, ExportResult};
use crate::part::ExportPart;
use crate::validate::{validate_mesh, MeshWarning};

/// Emit a 3MF archive containing every part in `parts`, at `path`.
///
/// Distinct `(color, material)` tuples across all parts are collected into
/// a single `<basematerials>` resource group, deduplicated by exact RGBA +
/// metallic/roughness key; each exported object that carries a material
/// references the group entry's property id. Parts with no appearance are
/// written without a `pid`/`pindex` pair.
pub fn export_3mf<B: GeometryBackend>(
    backend: &B,
    parts: &[ExportPart],
    path: &Path,
    tolerance: f64,
) -> ExportResult<()> {
    if parts.is_empty() {
        return Err(ExportError::new(
            ExportErrorKind::Validation,
            "no parts selected for 3MF export",
        ));
    }

    let mut material_keys: Vec<String> = Vec::new();
    let mut material_entries: Vec<(String, Material)> = Vec::new();
    let mut object_pindex: Vec<Option<usize>> = Vec::with_capacity(parts.len());

    for part in parts {
        match &part.appearance.material {
            Some(material) => {
                let key = material_key(material);
                let idx = match material_keys.iter().position(|k| k == &key) {
                    Some(i) => i,
                    None => {
                        material_keys.push(key.clone());
                        material_entries.push((part.name.to_string(), *material));
                        material_entries.len() - 1
                    }
                };
                object_pindex.push(Some(idx));
            }
            None => object_pindex.push(None),
        }
    }

    let basematerials_id = 1u32;
    let object_ids: Vec<u32> = (0..parts.len()).map(|i| 2 + i as u32).collect();

    let mut meshes_xml = String::new();
    for (i, part) in parts.iter().enumerate() {
        let mesh = backend.tessellate(part.solid, tolerance);
        let report = validate_mesh(&mesh);
        if report.warnings.contains(&MeshWarning::EmptyMesh) {
            return Err(ExportError::new(
                ExportErrorKind::Validation,
                format!("part '{}' tessellated to an empty mesh", part.name),
            ));
        }
        meshes_xml.push_str(&object_xml(object_ids[i], part, &mesh, object_pindex[i], basematerials_id));
    }

    let model_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<model unit="millimeter" xml:lang="en-US" xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
    <resources>
{basematerials}        {meshes}    </resources>
    <build>
{items}    </build>
</model>"#,
        basematerials = basematerials_xml(basematerials_id, &material_entries),
        meshes = meshes_xml,
        items = object_ids
            .iter()
            .map(|id| format!("        <item objectid=\"{id}\"/>\n"))
            .collect::<String>(),
    );

    let file = std::fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(6));

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml().as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(rels_xml().as_bytes())?;

    zip.start_file("3D/3dmodel.model", options)?;
    zip.write_all(model_xml.as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn material_key(m: &Material) -> String {
    let [r, g, b, a] = m.base_color.as_rgba_bytes();
    format!(
        "{r:02x}{g:02x}{b:02x}{a:02x}:{:.0}:{:.0}",
        m.metallic * 1000.0,
        m.roughness * 1000.0
    )
}

fn color_hex(color: &Color) -> String {
    let [r, g, b, a] = color.as_rgba_bytes();
    format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
}

fn basematerials_xml(id: u32, entries: &[(String, Material)]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = format!("<basematerials id=\"{id}\">\n");
    for (name, material) in entries {
        out.push_str(&format!(
            "            <base name=\"{}\" displaycolor=\"{}\"/>\n",
            xml_escape(name),
            color_hex(&material.base_color)
        ));
    }
    out.push_str("        </basematerials>\n");
    out
}

fn object_xml(
    object_id: u32,
    part: &ExportPart,
    mesh: &tiacad_geom::Mesh,
    pindex: Option<usize>,
    basematerials_id: u32,
) -> String {
    let pid_attr = match pindex {
        Some(idx) => format!(" pid=\"{basematerials_id}\" pindex=\"{idx}\""),
        None => String::new(),
    };

    let mut vertices_xml = String::new();
    for p in mesh.positions() {
        vertices_xml.push_str(&format!(
            "                    <vertex x=\"{:.6}\" y=\"{:.6}\" z=\"{:.6}\"/>\n",
            p.x, p.y, p.z
        ));
    }

    let mut triangles_xml = String::new();
    for tri in mesh.triangles() {
        triangles_xml.push_str(&format!(
            "                    <triangle v1=\"{}\" v2=\"{}\" v3=\"{}\"/>\n",
            tri[0], tri[1], tri[2]
        ));
    }

    format!(
        "        <object id=\"{object_id}\" type=\"model\" name=\"{name}\"{pid_attr}>\n            <mesh>\n                <vertices>\n{vertices_xml}                </vertices>\n                <triangles>\n{triangles_xml}                </triangles>\n            </mesh>\n        </object>\n",
        name = xml_escape(part.name),
    )
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Target="/3D/3dmodel.model" Id="rel-1" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>"#
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiacad_geom::TruckBackend;
    use tiacad_registry::Appearance;

    #[test]
    fn export_3mf_produces_valid_zip_with_one_material_entry() {
        let backend = TruckBackend;
        let solid_a = backend.box_solid(10.0, 10.0, 10.0).unwrap();
        let solid_b = backend.box_solid(5.0, 5.0, 5.0).unwrap();
        let red = Appearance {
            material: Some(Material::new(Color::rgb(1.0, 0.0, 0.0), 0.0, 0.5, 1.0)),
        };
        let parts = vec![
            ExportPart { name: "a", solid: &solid_a, appearance: &red },
            ExportPart { name: "b", solid: &solid_b, appearance: &red },
        ];
        let dir = std::env::temp_dir();
        let path = dir.join("tiacad_export_test.3mf");
        export_3mf(&backend, &parts, &path, 0.1).expect("3MF export should succeed");

        let bytes = std::fs::read(&path).expect("file should exist");
        assert_eq!(&bytes[0..2], b"PK");

        let reader = std::io::Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(reader).expect("archive should be readable");
        let mut model = String::new();
        std::io::Read::read_to_string(
            &mut archive.by_name("3D/3dmodel.model").unwrap(),
            &mut model,
        )
        .unwrap();
        assert_eq!(model.matches("<base ").count(), 1, "two parts share one material entry");
        assert_eq!(model.matches("<object ").count(), 2);
        std::fs::remove_file(&path).ok();
    }
}
