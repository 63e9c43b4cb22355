//! Jar-in-jar packaging.
//!
//! [`jar_in_jar::JarInJar`] copies a built archive to its conventional
//! location, then embeds resolved nested jars into the copy together with
//! loader metadata: synthesized `fabric.mod.json` descriptors for Fabric and
//! an aggregated `META-INF/jarjar/metadata.json` for NeoForge. All archive
//! rewriting goes through [`archive::merge_entries`].

pub mod archive;
pub mod copy_task;
pub mod fabric;
pub mod jar_in_jar;
pub mod manifest;
pub mod neo;
