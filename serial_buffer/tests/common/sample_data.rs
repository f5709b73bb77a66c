// Record shapes modelled on a typical generated record:
// every scalar width, text, sequences of text, fixed arrays,
// and nested records (single, sequence and fixed array of them).

use std::ops;

use rand::Rng;
use rand_pcg::Lcg64Xsh32;
use serial_buffer::{Decode, Encode};

pub const SAMPLE_SCHEMA: &str = "
# Generated records used by the schema tests

struct Node:
    string  name
    bool    is_enabled
    uint64  stride_bytes

struct Sample:
    bool       is_enabled
    uint8      luminance
    int8       offset
    uint16     id
    int16      delta
    uint32     complexity
    int32      bias
    uint64     memory_pos
    int64      grid_pos
    float      slider_pos
    string     name
    string[]   tokens
    string[2]  greeting_and_response
    uint32[]   ipv4_addresses
    uint32[8]  slot_indexes
    Node       parent
    Node[]     children
    Node[2]    pair
";

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub struct Node {
	pub name: String,
	pub is_enabled: bool,
	pub stride_bytes: u64,
}

impl Generate for Node {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		const NAMES: [&str; 6] = [
			"Im parental unit.",
			"Im child 0.",
			"Im child 1.",
			"Im bananananananana 0.",
			"",
			"ünïcödé ✓",
		];
		Self {
			name: NAMES[rng.gen_range(0..NAMES.len())].to_string(),
			is_enabled: rng.gen_bool(0.5),
			stride_bytes: rng.gen(),
		}
	}
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub struct Sample {
	pub is_enabled: bool,
	pub luminance: u8,
	pub offset: i8,
	pub id: u16,
	pub delta: i16,
	pub complexity: u32,
	pub bias: i32,
	pub memory_pos: u64,
	pub grid_pos: i64,
	pub slider_pos: f32,
	pub name: String,
	pub tokens: Vec<String>,
	pub greeting_and_response: [String; 2],
	pub ipv4_addresses: Vec<u32>,
	pub slot_indexes: [u32; 8],
	pub parent: Node,
	pub children: Vec<Node>,
	pub pair: [Node; 2],
}

impl Generate for Sample {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		const NAMES: [&str; 4] = [
			"The sunlight strikes the rainbow and makes a rainbow.",
			"Token1 is Tolkien",
			"So I know this puppy.",
			"That's wonderful! Do tell.",
		];
		const MAX_TOKENS: usize = 6;
		const MAX_ADDRESSES: usize = 10;
		const MAX_CHILDREN: usize = 4;
		let pick = |rng: &mut R| NAMES[rng.gen_range(0..NAMES.len())].to_string();

		Self {
			is_enabled: rng.gen_bool(0.5),
			luminance: rng.gen(),
			offset: rng.gen(),
			id: rng.gen(),
			delta: rng.gen(),
			complexity: rng.gen(),
			bias: rng.gen(),
			memory_pos: rng.gen(),
			grid_pos: rng.gen(),
			slider_pos: rng.gen(),
			name: pick(rng),
			tokens: generate_vec::<_, ()>(rng, 0..MAX_TOKENS)
				.iter()
				.map(|_| pick(rng))
				.collect(),
			greeting_and_response: [pick(rng), pick(rng)],
			ipv4_addresses: generate_vec(rng, 0..MAX_ADDRESSES),
			slot_indexes: <[u32; 8] as Generate>::generate(rng),
			parent: Node::generate(rng),
			children: generate_vec(rng, 0..MAX_CHILDREN),
			pair: [Node::generate(rng), Node::generate(rng)],
		}
	}
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub struct Samples {
	pub samples: Vec<Sample>,
}

/// Size of encoding, calculated independently of the encoder.
pub trait EncodedSize {
	fn encoded_size(&self, prefix: usize) -> usize;
}

fn text_size(text: &str, prefix: usize) -> usize {
	prefix + text.len()
}

impl EncodedSize for Node {
	fn encoded_size(&self, prefix: usize) -> usize {
		text_size(&self.name, prefix) + 1 + 8
	}
}

impl EncodedSize for Sample {
	fn encoded_size(&self, prefix: usize) -> usize {
		const SCALARS: usize = 1 + 1 + 1 + 2 + 2 + 4 + 4 + 8 + 8 + 4;

		SCALARS
			+ text_size(&self.name, prefix)
			+ prefix + self.tokens.iter().map(|token| text_size(token, prefix)).sum::<usize>()
			+ self
				.greeting_and_response
				.iter()
				.map(|text| text_size(text, prefix))
				.sum::<usize>()
			+ prefix + self.ipv4_addresses.len() * 4
			+ 8 * 4
			+ self.parent.encoded_size(prefix)
			+ prefix + self.children.iter().map(|node| node.encoded_size(prefix)).sum::<usize>()
			+ self.pair.iter().map(|node| node.encoded_size(prefix)).sum::<usize>()
	}
}

impl EncodedSize for Samples {
	fn encoded_size(&self, prefix: usize) -> usize {
		prefix
			+ self
				.samples
				.iter()
				.map(|sample| sample.encoded_size(prefix))
				.sum::<usize>()
	}
}

pub trait Generate {
	fn generate<R: Rng>(rng: &mut R) -> Self;
}

impl Generate for () {
	fn generate<R: Rng>(_: &mut R) -> Self {}
}

macro_rules! impl_generate {
	($ty:ty) => {
		impl Generate for $ty {
			fn generate<R: Rng>(rng: &mut R) -> Self {
				rng.gen()
			}
		}
	};
}

impl_generate!(u32);

impl<T: Generate, const N: usize> Generate for [T; N] {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		std::array::from_fn(|_| T::generate(rng))
	}
}

fn generate_vec<R: Rng, T: Generate>(rng: &mut R, range: ops::Range<usize>) -> Vec<T> {
	let len = rng.gen_range(range);
	let mut result = Vec::with_capacity(len);
	for _ in 0..len {
		result.push(T::generate(rng));
	}
	result
}

pub fn generate_data() -> Samples {
	const STATE: u64 = 3141592653;
	const STREAM: u64 = 5897932384;

	let mut rng = Lcg64Xsh32::new(STATE, STREAM);

	const SAMPLES: usize = 200;
	Samples {
		samples: generate_vec::<_, Sample>(&mut rng, SAMPLES..SAMPLES + 1),
	}
}
