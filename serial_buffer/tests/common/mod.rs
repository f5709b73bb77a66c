#![allow(dead_code, unused_imports, unused_macros)]

mod sample_data;
pub use sample_data::{
	generate_data as generate_sample_data, EncodedSize, Node, Sample, Samples, SAMPLE_SCHEMA,
};

pub enum Test {
	Primitives,
	Arrays,
	ArraysOfStrings,
	ZeroFilledArrays,
	Tuples,
	Boxes,
	Options,
	VecOfPrimitives,
	VecOfVecs,
	EmptyVecs,
	Strings,
	EmptyStrings,
	UnicodeStrings,
	NestedRecords,
	TupleStruct,
	UnitStruct,
	Generics,
	SerialWith,
	SampleData,
}

/// Size of encoded sample data, calculated independently of the encoder.
pub fn sample_data_size(prefix: usize) -> usize {
	generate_sample_data().encoded_size(prefix)
}

macro_rules! tests {
	($test_round_trip:ident) => {
		#[test]
		fn primitives() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Foo {
				u8: u8,
				u16: u16,
				u32: u32,
				u64: u64,
				u128: u128,
				i8: i8,
				i16: i16,
				i32: i32,
				i64: i64,
				i128: i128,
				f32: f32,
				f64: f64,
				bool: bool,
			}

			let input = Foo {
				u8: 0x01,
				u16: 0x0203,
				u32: 0x04050607,
				u64: 0x08090a0b0c0d0e0f,
				u128: 0x101112131415161718191a1b1c1d1e1f,
				i8: -0x01,
				i16: -0x0203,
				i32: -0x04050607,
				i64: -0x08090a0b0c0d0e0f,
				i128: -0x101112131415161718191a1b1c1d1e1f,
				f32: f32::MAX,
				f64: f64::MIN_POSITIVE,
				bool: true,
			};
			$test_round_trip(&input, Test::Primitives, 0);
		}

		#[test]
		fn arrays() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Foo {
				empty: [u8; 0],
				single: [u8; 1],
				double: [u16; 2],
				triple: [u32; 3],
			}

			let input = Foo {
				empty: [],
				single: [0x01],
				double: [0x0203, 0x0405],
				triple: [0x06070809, 0x0a0b0c0d, 0x0e0f1011],
			};
			$test_round_trip(&input, Test::Arrays, 0);
		}

		#[test]
		fn arrays_of_strings() {
			let input: [String; 2] = [
				"So I know this puppy.".to_string(),
				"That's wonderful! Do tell.".to_string(),
			];
			$test_round_trip(&input, Test::ArraysOfStrings, 0);
		}

		#[test]
		fn zero_filled_arrays() {
			let input = [0u64; 4];
			$test_round_trip(&input, Test::ZeroFilledArrays, 0);
		}

		#[test]
		fn tuples() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Foo {
				tup: (u8, u16, u32),
			}

			let input = Foo {
				tup: (0x01, 0x0203, 0x04050607),
			};
			$test_round_trip(&input, Test::Tuples, 0);
		}

		#[test]
		fn boxes() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Foo {
				num: Box<u32>,
				bar: Box<Bar>,
			}

			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Bar {
				small: u8,
				big: u32,
			}

			let input = Foo {
				num: Box::new(0x01020304),
				bar: Box::new(Bar {
					small: 0x05,
					big: 0x06070809,
				}),
			};
			$test_round_trip(&input, Test::Boxes, 0);
		}

		#[test]
		fn options() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Foo {
				bar: Option<Bar>,
				vec: Option<Vec<u16>>,
				str: Option<String>,
			}

			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Bar {
				small: u8,
				big: u32,
			}

			$test_round_trip(
				&Foo {
					bar: None,
					vec: None,
					str: None,
				},
				Test::Options,
				0,
			);

			$test_round_trip(
				&Foo {
					bar: Some(Bar {
						small: 0x01,
						big: 0x0203,
					}),
					vec: None,
					str: Some("".to_string()),
				},
				Test::Options,
				1,
			);

			$test_round_trip(
				&Foo {
					bar: None,
					vec: Some(vec![0x0405, 0x0607, 0x0809]),
					str: Some("def".to_string()),
				},
				Test::Options,
				2,
			);
		}

		#[test]
		fn vec_of_primitives() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Foo {
				small: Vec<u8>,
				middle: Vec<u16>,
				big: Vec<u32>,
			}

			$test_round_trip(
				&Foo {
					small: Vec::new(),
					middle: Vec::new(),
					big: Vec::new(),
				},
				Test::VecOfPrimitives,
				0,
			);

			$test_round_trip(
				&Foo {
					small: vec![0x01],
					middle: vec![0x0203],
					big: vec![0x04050607],
				},
				Test::VecOfPrimitives,
				1,
			);

			$test_round_trip(
				&Foo {
					small: vec![0x01, 0x02, 0x03],
					middle: vec![0x0405, 0x0607, 0x0809, 0x0a0b, 0x0c0d],
					big: vec![0x0e0f1012, 0x13141516, 0x1718191a],
				},
				Test::VecOfPrimitives,
				2,
			);
		}

		#[test]
		fn vec_of_vecs() {
			let input: Vec<Vec<u8>> = vec![
				vec![1, 2, 3],
				vec![4, 5, 6, 7, 8, 9],
				vec![10],
				vec![],
				vec![11, 12],
				vec![13, 14, 15, 16],
				vec![],
			];
			$test_round_trip(&input, Test::VecOfVecs, 0);
		}

		#[test]
		fn empty_vecs() {
			$test_round_trip(&Vec::<u8>::new(), Test::EmptyVecs, 0);

			let input = Vec::<u64>::with_capacity(5);
			assert!(input.capacity() >= 5);
			$test_round_trip(&input, Test::EmptyVecs, 1);

			$test_round_trip(&Vec::<String>::new(), Test::EmptyVecs, 2);
		}

		#[test]
		fn strings() {
			$test_round_trip(&"abc".to_string(), Test::Strings, 0);
			$test_round_trip(&"d".to_string(), Test::Strings, 1);
			$test_round_trip(&"efghijkl".to_string(), Test::Strings, 2);
			$test_round_trip(&"MNOPQRSTIVWXYZ".to_string(), Test::Strings, 3);
		}

		#[test]
		fn empty_strings() {
			$test_round_trip(&String::new(), Test::EmptyStrings, 0);

			let mut input = "x".to_string();
			input.pop();
			assert!(input.capacity() >= 1);
			$test_round_trip(&input, Test::EmptyStrings, 1);
		}

		#[test]
		fn unicode_strings() {
			// 17 bytes, 13 chars
			let input = "héllo wörld ✓".to_string();
			assert_eq!(input.len(), 17);
			$test_round_trip(&input, Test::UnicodeStrings, 0);
		}

		#[test]
		fn nested_records() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Parent {
				id: u16,
				child: Child,
				tail: u8,
			}

			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Child {
				flag: bool,
				value: i32,
			}

			let input = Parent {
				id: 0x0102,
				child: Child {
					flag: true,
					value: -3,
				},
				tail: 0xff,
			};
			$test_round_trip(&input, Test::NestedRecords, 0);
		}

		#[test]
		fn tuple_struct() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Pair(u32, String);

			$test_round_trip(&Pair(7, "xy".to_string()), Test::TupleStruct, 0);
		}

		#[test]
		fn unit_struct() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Marker;

			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Empty {}

			$test_round_trip(&Marker, Test::UnitStruct, 0);
			$test_round_trip(&Empty {}, Test::UnitStruct, 1);
		}

		#[test]
		fn generics() {
			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Wrapper<T> {
				inner: T,
				items: Vec<T>,
			}

			let input = Wrapper::<u16> {
				inner: 7,
				items: vec![1, 2],
			};
			$test_round_trip(&input, Test::Generics, 0);
		}

		#[test]
		fn serial_with() {
			use std::net::Ipv4Addr;

			use serial_buffer::{DecodeWith, EncodeWith, SerialBuffer};

			struct Ipv4AsU32;

			impl EncodeWith<Ipv4Addr> for Ipv4AsU32 {
				fn encode_with(addr: &Ipv4Addr, buffer: &mut SerialBuffer) {
					u32::from(*addr).encode_into(buffer);
				}
			}

			impl DecodeWith<Ipv4Addr> for Ipv4AsU32 {
				fn decode_with(buffer: &mut SerialBuffer) -> serial_buffer::Result<Ipv4Addr> {
					u32::decode_from(buffer).map(Ipv4Addr::from)
				}
			}

			#[derive(Encode, Decode, Debug, PartialEq)]
			struct Host {
				#[serial_with(Ipv4AsU32)]
				gateway: Ipv4Addr,
				port: u16,
			}

			let input = Host {
				gateway: Ipv4Addr::new(192, 168, 0, 1),
				port: 8080,
			};
			$test_round_trip(&input, Test::SerialWith, 0);
		}

		#[test]
		fn sample_data() {
			let input = generate_sample_data();
			$test_round_trip(&input, Test::SampleData, 0);
		}
	};
}

pub(crate) use tests;
