//! STL (Stereolithography) file format support.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Facet normal
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//! endsolid name
//! ```

use std::io::Write;
use std::path::Path;

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, MeshTopology, Triangle, Vector3, Vertex};
use tracing::debug;

use crate::atomic::write_atomically;
use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

const HEADER_TEXT: &[u8] = b"binary STL written by tomomesh mesh-io";

/// STL encoding to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StlEncoding {
    /// Little-endian binary STL.
    #[default]
    Binary,
    /// Human-readable ASCII STL.
    Ascii,
}

/// Load a mesh from an STL file, detecting the encoding.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid STL.
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    let mesh = read_stl(&bytes)?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Loaded STL"
    );
    Ok(mesh)
}

/// Parse STL data held in memory.
///
/// A buffer whose length matches the binary layout for its declared
/// triangle count is read as binary, even if its header starts with
/// `solid`. Anything else starting with `solid` is read as ASCII.
///
/// # Errors
///
/// Returns an error if the data is neither valid binary nor ASCII STL.
pub fn read_stl(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if is_exact_binary(bytes) {
        return read_binary(bytes);
    }
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    if bytes[start..].starts_with(b"solid") {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| IoError::invalid_content("ASCII STL is not valid UTF-8"))?;
        read_ascii(text)
    } else {
        read_binary(bytes)
    }
}

fn is_exact_binary(bytes: &[u8]) -> bool {
    declared_count(bytes)
        .is_some_and(|n| HEADER_SIZE + 4 + n as usize * TRIANGLE_SIZE == bytes.len())
}

fn declared_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..HEADER_SIZE + 4)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

fn read_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    let expected = declared_count(bytes).ok_or_else(|| {
        IoError::invalid_content(format!(
            "{} bytes is too short for a binary STL header",
            bytes.len()
        ))
    })?;

    let body = &bytes[HEADER_SIZE + 4..];
    let available = body.len() / TRIANGLE_SIZE;
    if available < expected as usize {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: available < expected, which is a u32
        let got = available as u32;
        return Err(IoError::Truncated { expected, got });
    }

    let mut welder = VertexWelder::with_capacity(expected as usize);
    for record in body.chunks_exact(TRIANGLE_SIZE).take(expected as usize) {
        // Skip the stored normal; it is recomputed from winding.
        let face = [
            welder.insert(read_f32x3(&record[12..24])),
            welder.insert(read_f32x3(&record[24..36])),
            welder.insert(read_f32x3(&record[36..48])),
        ];
        welder.faces.push(face);
    }
    Ok(welder.finish())
}

fn read_f32x3(buf: &[u8]) -> [f32; 3] {
    let f = |o: usize| f32::from_le_bytes([buf[o], buf[o + 1], buf[o + 2], buf[o + 3]]);
    [f(0), f(4), f(8)]
}

fn read_ascii(text: &str) -> IoResult<IndexedMesh> {
    let mut welder = VertexWelder::with_capacity(0);
    let mut corners: Vec<u32> = Vec::with_capacity(3);

    for (line_no, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        match keyword.to_ascii_lowercase().as_str() {
            "outer" => corners.clear(),
            "vertex" => {
                let mut xyz = [0.0_f32; 3];
                for c in &mut xyz {
                    let token = parts.next().ok_or_else(|| {
                        IoError::invalid_content(format!(
                            "line {}: vertex needs three coordinates",
                            line_no + 1
                        ))
                    })?;
                    *c = token.parse()?;
                }
                corners.push(welder.insert(xyz));
            }
            "endfacet" => {
                if let &[a, b, c] = corners.as_slice() {
                    welder.faces.push([a, b, c]);
                } else {
                    return Err(IoError::invalid_content(format!(
                        "line {}: facet has {} vertices, expected 3",
                        line_no + 1,
                        corners.len()
                    )));
                }
                corners.clear();
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(welder.finish())
}

/// Deduplicates vertices by the bit pattern of their single-precision
/// coordinates.
struct VertexWelder {
    lookup: HashMap<[u32; 3], u32>,
    vertices: Vec<Vertex>,
    faces: Vec<[u32; 3]>,
}

impl VertexWelder {
    fn with_capacity(faces: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity(faces / 2),
            vertices: Vec::with_capacity(faces / 2),
            faces: Vec::with_capacity(faces),
        }
    }

    fn insert(&mut self, xyz: [f32; 3]) -> u32 {
        // -0.0 and 0.0 weld together
        let key = xyz.map(|c| if c == 0.0 { 0 } else { c.to_bits() });
        let vertices = &mut self.vertices;
        *self.lookup.entry(key).or_insert_with(|| {
            #[allow(clippy::cast_possible_truncation)]
            // Truncation: mesh indices are u32
            let index = vertices.len() as u32;
            vertices.push(Vertex::from_coords(
                f64::from(xyz[0]),
                f64::from(xyz[1]),
                f64::from(xyz[2]),
            ));
            index
        })
    }

    fn finish(self) -> IndexedMesh {
        let mut mesh = IndexedMesh::from_parts(self.vertices, self.faces);
        mesh.compute_vertex_normals();
        mesh
    }
}

/// Save a mesh to an STL file.
///
/// The mesh is validated first; the file appears at `path` only once it
/// has been written completely.
///
/// # Errors
///
/// Returns an error if the mesh is invalid or the file cannot be written.
pub fn save_stl<P: AsRef<Path>>(
    mesh: &IndexedMesh,
    path: P,
    encoding: StlEncoding,
) -> IoResult<()> {
    let path = path.as_ref();
    mesh.validate()?;
    write_atomically(path, |writer| write_stl(mesh, writer, encoding))?;
    debug!(
        path = %path.display(),
        faces = mesh.face_count(),
        ?encoding,
        "Saved STL"
    );
    Ok(())
}

/// Serialize a mesh as STL into any writer.
///
/// # Errors
///
/// Returns an error if a face index is out of range, the face count
/// exceeds `u32`, or the writer fails.
pub fn write_stl<W: Write + ?Sized>(
    mesh: &IndexedMesh,
    writer: &mut W,
    encoding: StlEncoding,
) -> IoResult<()> {
    mesh.validate()?;
    match encoding {
        StlEncoding::Binary => write_binary(mesh, writer),
        StlEncoding::Ascii => write_ascii(mesh, writer),
    }
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: STL stores single-precision coordinates
fn to_f32x3(v: Vector3<f64>) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

fn facet_normal(tri: &Triangle) -> [f32; 3] {
    to_f32x3(tri.normal().unwrap_or_else(Vector3::zeros))
}

fn write_binary<W: Write + ?Sized>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    let face_count = u32::try_from(mesh.face_count()).map_err(|_| IoError::TooManyFaces {
        faces: mesh.face_count(),
    })?;

    let mut header = [b' '; HEADER_SIZE];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&face_count.to_le_bytes())?;

    let mut record = [0u8; TRIANGLE_SIZE];
    for tri in mesh.triangles() {
        let fields = [
            facet_normal(&tri),
            to_f32x3(tri.v0.coords),
            to_f32x3(tri.v1.coords),
            to_f32x3(tri.v2.coords),
        ];
        for (slot, value) in record[..48]
            .chunks_exact_mut(4)
            .zip(fields.iter().flatten())
        {
            slot.copy_from_slice(&value.to_le_bytes());
        }
        writer.write_all(&record)?;
    }
    Ok(())
}

fn write_ascii<W: Write + ?Sized>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "solid tomomesh")?;
    for tri in mesh.triangles() {
        let [nx, ny, nz] = facet_normal(&tri);
        writeln!(writer, "  facet normal {nx} {ny} {nz}")?;
        writeln!(writer, "    outer loop")?;
        for p in [tri.v0, tri.v1, tri.v2] {
            // f32 Display is shortest round-trip, so re-reading welds exactly
            let [x, y, z] = to_f32x3(p.coords);
            writeln!(writer, "      vertex {x} {y} {z}")?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid tomomesh")?;
    Ok(())
}
