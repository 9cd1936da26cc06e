// Builder for synthetic database images used by the integration tests
#![allow(dead_code)]

pub const IMAGE_SIZE: usize = 0x10000;

/// Header field offsets relative to the signature
const COUNTS: usize = 13;
const RESPONSES: usize = 17;
const PROCESSES: usize = 19;
const OBJECTS: usize = 21;
const LOCATIONS: usize = 23;
const MESSAGES: usize = 25;
const CONNECTIONS: usize = 27;
const VOCABULARY: usize = 29;
const POSITIONS: usize = 31;

pub struct ImageBuilder {
    pub memory: Vec<u8>,
    pub signature: usize,
    next_free: usize,
}

/// Store text the way the database does: inverted, closed by code 0x1f
pub fn encode_text(text: &[u8]) -> Vec<u8> {
    let mut bytes: Vec<u8> = text.iter().map(|c| 255 - c).collect();
    bytes.push(255 - 0x1f);
    bytes
}

impl ImageBuilder {
    pub fn new(signature: usize) -> Self {
        let mut memory = vec![0u8; IMAGE_SIZE];
        for i in 1..=5 {
            memory[signature + 2 * i] = 16 + i as u8;
        }
        ImageBuilder {
            memory,
            signature,
            next_free: signature + 0x40,
        }
    }

    fn alloc(&mut self, bytes: &[u8]) -> usize {
        let addr = self.next_free;
        self.memory[addr..addr + bytes.len()].copy_from_slice(bytes);
        // Keep a zero gap so tables never run into each other
        self.next_free += bytes.len() + 4;
        addr
    }

    fn put_word(&mut self, addr: usize, value: usize) {
        self.memory[addr..addr + 2].copy_from_slice(&(value as u16).to_le_bytes());
    }

    fn header_field(&mut self, field: usize, value: usize) {
        let addr = self.signature + field;
        self.put_word(addr, value);
    }

    /// Point a header field at a pointer cell that holds `table`
    fn header_cell(&mut self, field: usize, table: usize) {
        let cell = self.alloc(&(table as u16).to_le_bytes());
        self.header_field(field, cell);
    }

    pub fn counts(&mut self, carried: u8, objects: u8, locations: u8, messages: u8) -> &mut Self {
        let base = self.signature + COUNTS;
        self.memory[base..base + 4].copy_from_slice(&[carried, objects, locations, messages]);
        self
    }

    fn command_table(&mut self, entries: &[(u8, u8, &[u8])]) -> usize {
        let blocks: Vec<usize> = entries.iter().map(|(_, _, block)| self.alloc(block)).collect();
        let mut table = Vec::new();
        for ((word1, word2, _), block) in entries.iter().zip(blocks) {
            table.push(*word1);
            table.push(*word2);
            table.extend_from_slice(&(block as u16).to_le_bytes());
        }
        table.extend_from_slice(&[0, 0, 0, 0]);
        self.alloc(&table)
    }

    pub fn responses(&mut self, entries: &[(u8, u8, &[u8])]) -> &mut Self {
        let table = self.command_table(entries);
        self.header_field(RESPONSES, table);
        self
    }

    pub fn processes(&mut self, entries: &[(u8, u8, &[u8])]) -> &mut Self {
        let table = self.command_table(entries);
        self.header_field(PROCESSES, table);
        self
    }

    fn strings(&mut self, field: usize, texts: &[&str]) {
        let blob: Vec<u8> = texts.iter().flat_map(|t| encode_text(t.as_bytes())).collect();
        let table = self.alloc(&blob);
        self.header_cell(field, table);
    }

    pub fn objects(&mut self, texts: &[&str]) -> &mut Self {
        self.strings(OBJECTS, texts);
        self
    }

    pub fn locations(&mut self, texts: &[&str]) -> &mut Self {
        self.strings(LOCATIONS, texts);
        self
    }

    pub fn messages(&mut self, texts: &[&str]) -> &mut Self {
        self.strings(MESSAGES, texts);
        self
    }

    pub fn connections(&mut self, exits: &[&[(u8, u8)]]) -> &mut Self {
        let mut table = Vec::new();
        for location in exits {
            for (direction, destination) in location.iter() {
                table.push(*direction);
                table.push(*destination);
            }
            table.push(0xff);
        }
        let addr = self.alloc(&table);
        self.header_cell(CONNECTIONS, addr);
        self
    }

    pub fn vocabulary(&mut self, words: &[(&str, u8)]) -> &mut Self {
        let mut table = Vec::new();
        for (word, token) in words {
            let padded = format!("{:<4}", word);
            table.extend(padded.bytes().take(4).map(|c| 255 - c));
            table.push(*token);
        }
        table.extend_from_slice(&[0, 0, 0, 0, 0]);
        let addr = self.alloc(&table);
        self.header_field(VOCABULARY, addr);
        self
    }

    pub fn positions(&mut self, positions: &[u8]) -> &mut Self {
        let mut table = positions.to_vec();
        table.push(0xff);
        let addr = self.alloc(&table);
        self.header_field(POSITIONS, addr);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.memory.clone()
    }
}

/// A small two-room adventure exercising every table
pub fn sample_image() -> Vec<u8> {
    let mut builder = ImageBuilder::new(0x6000);
    builder
        .counts(1, 3, 2, 2)
        .objects(&["A lamp", "A rusty key", "A sleeping dragon"])
        .locations(&["You are in a dark cave.", "A <narrow> ledge & a drop."])
        .messages(&["Nothing happens.", "The dragon wakes!"])
        .responses(&[
            // GET LAMP: one condition, a one-argument then a bare action
            (20, 30, &[3, 0, 0xff, 13, 0, 4, 0xff]),
            // N (any noun): one condition, two actions
            (1, 255, &[0, 0, 0xff, 21, 1, 2, 0xff]),
        ])
        .processes(&[(9, 9, &[13, 5, 1, 0xff, 38, 1, 7, 0xff])])
        .connections(&[&[(1, 1)], &[(2, 0), (5, 0)]])
        .vocabulary(&[("NORT", 1), ("N", 1), ("SOUT", 2), ("GET", 20), ("LAMP", 30)])
        .positions(&[254, 0, 1]);
    builder.build()
}
