use protolite::pblite::{FieldDescriptor, FieldKind, Message, SchemaError, StorageError, Value};

/// Output truncation and formatting limits for decoded messages.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single message.
	pub max_fields_per_message: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for repeated fields.
	pub max_repeated_items: usize,
	/// Maximum nesting depth printed before eliding a message.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_message: 80,
			max_string_len: 200,
			max_repeated_items: 16,
			max_print_depth: 6,
		}
	}
}

impl PrintOptions {
	/// Preset for a one-screen overview.
	pub fn compact() -> Self {
		Self {
			max_fields_per_message: 24,
			max_string_len: 60,
			max_repeated_items: 4,
			max_print_depth: 2,
		}
	}
}

/// Print a message tree to stdout.
pub fn print_message(message: &dyn Message, options: PrintOptions) -> Result<(), SchemaError> {
	for line in render_message(message, options)? {
		println!("{line}");
	}
	Ok(())
}

/// Render a message tree as indented lines.
pub fn render_message(message: &dyn Message, options: PrintOptions) -> Result<Vec<String>, SchemaError> {
	let mut out = Vec::new();
	render_into(&mut out, message, 0, 0, options)?;
	Ok(out)
}

fn render_into(out: &mut Vec<String>, message: &dyn Message, indent: usize, depth: u32, options: PrintOptions) -> Result<(), SchemaError> {
	let pad = " ".repeat(indent);
	let type_name = message.type_name();
	if depth >= options.max_print_depth {
		out.push(format!("{pad}{type_name} {{ ... }}"));
		return Ok(());
	}

	let storage = |source: StorageError| SchemaError::Storage {
		type_name: type_name.to_owned(),
		source,
	};

	out.push(format!("{pad}{type_name} {{"));
	let fields = &message.descriptor().fields;
	for field in fields.iter().take(options.max_fields_per_message) {
		let number = field.number;
		match (&field.kind, field.is_repeated()) {
			(FieldKind::Message(_) | FieldKind::Group(_), true) => {
				let items = message.repeated_messages(number).map_err(storage)?;
				if items.is_empty() {
					out.push(format!("{pad}  {} = []", field.name));
					continue;
				}
				out.push(format!("{pad}  {} = [", field.name));
				for item in items.iter().take(options.max_repeated_items) {
					render_into(out, *item, indent + 4, depth + 1, options)?;
				}
				push_more(out, &pad, items.len(), options.max_repeated_items);
				out.push(format!("{pad}  ]"));
			}
			(FieldKind::Message(_) | FieldKind::Group(_), false) => {
				out.push(format!("{pad}  {} =", field.name));
				render_into(out, message.message(number).map_err(storage)?, indent + 4, depth + 1, options)?;
			}
			(_, true) => {
				let items = message.repeated(number).map_err(storage)?;
				if items.is_empty() {
					out.push(format!("{pad}  {} = []", field.name));
					continue;
				}
				out.push(format!("{pad}  {} = [", field.name));
				for item in items.iter().take(options.max_repeated_items) {
					out.push(format!("{pad}    {}", format_scalar(field, item, options)));
				}
				push_more(out, &pad, items.len(), options.max_repeated_items);
				out.push(format!("{pad}  ]"));
			}
			(_, false) => {
				let value = message.get(number).map_err(storage)?;
				out.push(format!("{pad}  {} = {}", field.name, format_scalar(field, &value, options)));
			}
		}
	}
	if fields.len() > options.max_fields_per_message {
		out.push(format!("{pad}  ... {} more fields", fields.len() - options.max_fields_per_message));
	}
	out.push(format!("{pad}}}"));
	Ok(())
}

fn push_more(out: &mut Vec<String>, pad: &str, len: usize, max: usize) {
	if len > max {
		out.push(format!("{pad}    ... {} more", len - max));
	}
}

fn format_scalar(field: &FieldDescriptor, value: &Value, options: PrintOptions) -> String {
	match (&field.kind, value) {
		(_, Value::String(text)) => format!("\"{}\"", truncate(text, options.max_string_len)),
		(FieldKind::Enum(item), Value::Int(number)) => match item.values.iter().find(|entry| i64::from(entry.number) == *number) {
			Some(entry) => format!("{number} ({})", entry.name),
			None => number.to_string(),
		},
		(_, other) => other.to_string(),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests;
