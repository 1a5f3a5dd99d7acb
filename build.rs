fn main() {
    let file_descriptor_set = protox::compile(["proto/atlas.proto"], ["proto"])
        .expect("failed to compile atlas.proto");
    prost_build::Config::new()
        .compile_fds(file_descriptor_set)
        .expect("failed to generate rust code from atlas.proto");
}
