use std::collections::HashMap;
use std::fmt;

/// mach/machine.h
pub const CPU_ARCH_ABI64: i32 = 0x0100_0000;
pub const CPU_TYPE_X86: i32 = 7;
pub const CPU_TYPE_ARM: i32 = 12;
pub const CPU_TYPE_X86_64: i32 = CPU_TYPE_X86 | CPU_ARCH_ABI64;
pub const CPU_TYPE_ARM64: i32 = CPU_TYPE_ARM | CPU_ARCH_ABI64;

/// cpu_type_t / cpu_subtype_t pair for the architecture launch option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Architecture {
    pub cpu_type: i32,
    pub cpu_subtype: i32,
}

lazy_static! {
    static ref ARCHITECTURES: HashMap<&'static str, Architecture> = {
        let mut table = HashMap::new();
        table.insert("arm64", Architecture::new(CPU_TYPE_ARM64, 0));
        table.insert("arm64e", Architecture::new(CPU_TYPE_ARM64, 2));
        table.insert("x86_64", Architecture::new(CPU_TYPE_X86_64, 3));
        table.insert("x86_64h", Architecture::new(CPU_TYPE_X86_64, 8));
        table.insert("i386", Architecture::new(CPU_TYPE_X86, 0));
        table.insert("arm", Architecture::new(CPU_TYPE_ARM, 0));
        table.insert("any", Architecture::ANY);
        table
    };
}

impl Architecture {
    pub const ANY: Architecture = Architecture {
        cpu_type: 0,
        cpu_subtype: 0,
    };

    pub const fn new(cpu_type: i32, cpu_subtype: i32) -> Self {
        Architecture {
            cpu_type,
            cpu_subtype,
        }
    }

    /// Look up a known name, or read a literal "type/subtype" pair
    /// (decimal or 0x-prefixed hex). None when neither applies.
    pub fn parse(name: &str) -> Option<Architecture> {
        let name = name.trim();

        if let Some(known) = ARCHITECTURES.get(name) {
            return Some(*known);
        }

        let (cpu_type, cpu_subtype) = name.split_once('/')?;
        Some(Architecture::new(
            parse_int(cpu_type)?,
            parse_int(cpu_subtype)?,
        ))
    }

    pub fn is_any(&self) -> bool {
        *self == Architecture::ANY
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}/{}", self.cpu_type, self.cpu_subtype)
    }
}

/// Name to (cpu_type, cpu_subtype); unrecognized names mean "no preference"
pub fn arch(name: &str) -> (i32, i32) {
    let Architecture {
        cpu_type,
        cpu_subtype,
    } = Architecture::parse(name).unwrap_or(Architecture::ANY);

    (cpu_type, cpu_subtype)
}

fn parse_int(value: &str) -> Option<i32> {
    let value = value.trim();

    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => i32::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
