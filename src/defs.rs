use once_cell::sync::Lazy;

use crate::die::DieInner;
use crate::value::DefaultValue;
use crate::Die;

pub static D2: Lazy<Die> = Lazy::new(|| standard(2));
pub static D3: Lazy<Die> = Lazy::new(|| standard(3));
pub static D4: Lazy<Die> = Lazy::new(|| standard(4));
pub static D6: Lazy<Die> = Lazy::new(|| standard(6));
pub static D8: Lazy<Die> = Lazy::new(|| standard(8));
pub static D10: Lazy<Die> = Lazy::new(|| standard(10));
pub static D12: Lazy<Die> = Lazy::new(|| standard(12));
pub static D20: Lazy<Die> = Lazy::new(|| standard(20));
pub static D100: Lazy<Die> = Lazy::new(|| standard(100));

fn standard(faces: DefaultValue) -> Die {
    Die::new(DieInner::uniform_sorted((1..=faces).collect()))
}

pub fn d2() -> Die {
    D2.clone()
}

pub fn d3() -> Die {
    D3.clone()
}

pub fn d4() -> Die {
    D4.clone()
}

pub fn d6() -> Die {
    D6.clone()
}

pub fn d8() -> Die {
    D8.clone()
}

pub fn d10() -> Die {
    D10.clone()
}

pub fn d12() -> Die {
    D12.clone()
}

pub fn d20() -> Die {
    D20.clone()
}

pub fn d100() -> Die {
    D100.clone()
}
