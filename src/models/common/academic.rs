crate::define_str_enum! {
    /// 学期
    Term, "../frontend/src/types/generated/common.ts", {
        First => "first",
        Second => "second",
        Third => "third",
    }
}
