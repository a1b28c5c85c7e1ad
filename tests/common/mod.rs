use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Build a minimal EPUB source tree inside a temp directory.
/// Returns (TempDir, path_to_opf). TempDir must be kept alive.
pub fn source_tree() -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::TempDir::new().expect("create temp dir");
    let root = tmp.path().join("book");
    write(&root, "mimetype", b"application/epub+zip");
    write(
        &root,
        "META-INF/container.xml",
        br#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/text/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#,
    );
    write(&root, "OEBPS/text/content.opf", b"<package/>");
    write(
        &root,
        "OEBPS/text/chapter1.xhtml",
        b"<html><body><h1>Chapter 1</h1></body></html>",
    );
    write(&root, "OEBPS/images/cover.jpg", &[0xff, 0xd8, 0xff, 0xe0, 0, 1, 2]);
    write(&root, "OEBPS/styles/book.css", b"body { margin: 0 }");
    let opf = root.join("OEBPS/text/content.opf");
    (tmp, opf)
}

#[allow(dead_code)]
pub fn write(root: &Path, rel: &str, data: &[u8]) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    std::fs::write(&path, data).expect("write file");
}

/// Every file under `root` keyed by its `/`-separated relative path.
#[allow(dead_code)]
pub fn snapshot_files(root: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
        for entry in std::fs::read_dir(dir).expect("read dir") {
            let path = entry.expect("dir entry").path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path
                    .strip_prefix(root)
                    .expect("under root")
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                out.insert(rel, std::fs::read(&path).expect("read file"));
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

/// Entry names of a zip archive in stored order
#[allow(dead_code)]
pub fn entry_names(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).expect("open epub");
    let archive = zip::ZipArchive::new(file).expect("open zip");
    (0..archive.len())
        .filter_map(|i| archive.name_for_index(i).map(|s| s.to_string()))
        .collect()
}

/// Basic structural validation of a packaged EPUB file
#[allow(dead_code)]
pub fn assert_valid_epub(path: &Path) {
    use std::io::Read;

    let file = std::fs::File::open(path).expect("open epub");
    let mut archive = zip::ZipArchive::new(file).expect("open zip");

    // Check mimetype is first entry and stored
    let mut mimetype = archive.by_index(0).expect("first entry");
    assert_eq!(mimetype.name(), "mimetype");
    assert_eq!(mimetype.compression(), zip::CompressionMethod::Stored);
    let mut content = String::new();
    mimetype.read_to_string(&mut content).expect("read mimetype");
    assert_eq!(content.trim(), "application/epub+zip");
    drop(mimetype);

    archive
        .by_name("META-INF/container.xml")
        .expect("container.xml");
}
