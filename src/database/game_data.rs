use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Serialize, Serializer};

use super::core::{locate_signature, ByteImage, Header};
use super::rules::{read_commands, Command, CommandKind};
use super::tables::{read_connections, read_vocabulary};
use super::text::decode_strings;
use crate::error::{Result, Table};
use crate::options::DecoderOptions;

/// Everything decoded from one database image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameData {
    pub locations: Vec<String>,
    pub objects: Vec<String>,
    pub messages: Vec<String>,
    pub vocabulary: IndexMap<String, u8>,
    pub responses: Option<Box<Command>>,
    pub processes: Option<Box<Command>>,
    /// Exits per location, direction token -> destination location
    #[serde(serialize_with = "serialize_exits")]
    pub connections: Vec<IndexMap<u8, u8>>,
    /// Starting location of each object, parallel to `objects`
    pub initial_object_positions: Vec<u8>,
    /// The first `n_objects_carried` objects start in the player's hands
    pub n_objects_carried: u8,
}

/// TOML only allows string keys, so direction tokens are written as text
fn serialize_exits<S: Serializer>(
    connections: &[IndexMap<u8, u8>],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(connections.iter().map(|exits| {
        exits
            .iter()
            .map(|(direction, destination)| (direction.to_string(), *destination))
            .collect::<IndexMap<String, u8>>()
    }))
}

impl GameData {
    /// Decode an image with default options
    pub fn from_image(memory: &[u8]) -> Result<GameData> {
        GameData::from_image_with(memory, &DecoderOptions::default())
    }

    pub fn from_image_with(memory: &[u8], options: &DecoderOptions) -> Result<GameData> {
        let version = options.version()?;
        let image = ByteImage::new(memory);
        let signature = locate_signature(&image, options.signature_search_start)?;
        let header = Header::read(&image, signature)?;
        trace!("Database header:{}", header);

        let responses = read_commands(&image, header.responses, CommandKind::Response, &version)?;
        let processes = read_commands(&image, header.processes, CommandKind::Process, &version)?;
        let objects = decode_strings(
            &image,
            header.objects,
            header.n_objects as usize,
            Table::Objects,
        )?;
        let locations = decode_strings(
            &image,
            header.locations,
            header.n_locations as usize,
            Table::Locations,
        )?;
        let messages = decode_strings(
            &image,
            header.messages,
            header.n_messages as usize,
            Table::Messages,
        )?;
        let connections =
            read_connections(&image, header.connections, header.n_locations as usize)?;
        let vocabulary = read_vocabulary(&image, header.vocabulary)?;
        let initial_object_positions = image
            .slice(
                header.object_positions,
                header.n_objects as usize,
                Table::ObjectPositions,
            )?
            .to_vec();

        let data = GameData {
            locations,
            objects,
            messages,
            vocabulary,
            responses,
            processes,
            connections,
            initial_object_positions,
            n_objects_carried: header.n_objects_carried,
        };
        debug!(
            "Decoded database: {} locations, {} objects, {} messages, {} words, {} responses, {} processes",
            data.locations.len(),
            data.objects.len(),
            data.messages.len(),
            data.vocabulary.len(),
            data.responses.as_ref().map_or(0, |c| c.chain_len()),
            data.processes.as_ref().map_or(0, |c| c.chain_len()),
        );
        Ok(data)
    }

    /// Token for a word as typed by the player
    pub fn lookup_word(&self, word: &str) -> Option<u8> {
        self.vocabulary
            .get(word.trim().to_uppercase().as_str())
            .copied()
    }

    /// All words sharing a token, in table order
    pub fn words_for_token(&self, token: u8) -> Vec<&str> {
        self.vocabulary
            .iter()
            .filter(|(_, t)| **t == token)
            .map(|(w, _)| w.as_str())
            .collect()
    }

    /// Descriptions of the objects the player starts with
    pub fn carried_objects(&self) -> &[String] {
        let n = (self.n_objects_carried as usize).min(self.objects.len());
        &self.objects[..n]
    }

    pub fn exits(&self, location: usize) -> Option<&IndexMap<u8, u8>> {
        self.connections.get(location)
    }

    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl fmt::Display for GameData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Locations:")?;
        for (i, text) in self.locations.iter().enumerate() {
            writeln!(f, "{:>4}: {}", i, text)?;
            if let Some(exits) = self.exits(i) {
                for (direction, destination) in exits {
                    writeln!(f, "        exit {} -> {}", direction, destination)?;
                }
            }
        }

        writeln!(f, "\nObjects ({} carried):", self.n_objects_carried)?;
        for (i, text) in self.objects.iter().enumerate() {
            let position = self.initial_object_positions.get(i).copied().unwrap_or(0);
            writeln!(f, "{:>4}: [{:>3}] {}", i, position, text)?;
        }

        writeln!(f, "\nMessages:")?;
        for (i, text) in self.messages.iter().enumerate() {
            writeln!(f, "{:>4}: {}", i, text)?;
        }

        writeln!(f, "\nVocabulary:")?;
        for (word, token) in &self.vocabulary {
            writeln!(f, "{:>4} {}", token, word)?;
        }

        writeln!(f, "\nResponses:")?;
        for command in self.responses.iter().flat_map(|c| c.iter()) {
            writeln!(f, "  {}", command)?;
        }

        writeln!(f, "\nProcesses:")?;
        for command in self.processes.iter().flat_map(|c| c.iter()) {
            writeln!(f, "  {}", command)?;
        }
        Ok(())
    }
}
