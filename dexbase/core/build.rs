use std::env;
use std::path::{Path, PathBuf};

pub fn main() {
    println!("cargo::rerun-if-changed=data/species.ron");

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));

    compress("data/species.ron", out.join("species.ron.gz"));
}

fn compress(path: impl AsRef<Path>, destination: impl AsRef<Path>) {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::fs::File;
    use std::io::{BufReader, BufWriter, copy};

    let mut origin = BufReader::new(File::open(path).expect("Read species data"));

    let mut encoder = {
        let destination = BufWriter::new(File::create(destination).expect("Create file"));

        GzEncoder::new(destination, Compression::best())
    };

    copy(&mut origin, &mut encoder).expect("Compress file");

    let _ = encoder.finish().expect("Finish encoding");
}
