//! # 晶体结构数据模型
//!
//! POSCAR、STRUCT_OUT、Materials Project 结构以及 SIESTA fdf 之间转换时
//! 共用的内部表示。原子坐标统一存为分数坐标，长度单位 Å。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `siesta/`, `mp/` 使用
//! - 使用 `nalgebra` 做坐标变换

use nalgebra::{Matrix3, Vector3};

/// 晶格：行向量 a, b, c
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    /// [[a1, a2, a3], [b1, b2, b3], [c1, c2, c3]]
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 列为晶格向量的矩阵，`cart = M * frac`
    fn columns(&self) -> Matrix3<f64> {
        let m = &self.matrix;
        Matrix3::new(
            m[0][0], m[1][0], m[2][0], //
            m[0][1], m[1][1], m[2][1], //
            m[0][2], m[1][2], m[2][2],
        )
    }

    /// 晶格参数 (a, b, c, α, β, γ)，角度单位为度
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let [a_vec, b_vec, c_vec] = self.matrix.map(Vector3::from);
        let (a, b, c) = (a_vec.norm(), b_vec.norm(), c_vec.norm());

        let angle = |u: &Vector3<f64>, v: &Vector3<f64>, nu: f64, nv: f64| {
            (u.dot(v) / (nu * nv)).clamp(-1.0, 1.0).acos().to_degrees()
        };

        (
            a,
            b,
            c,
            angle(&b_vec, &c_vec, b, c),
            angle(&a_vec, &c_vec, a, c),
            angle(&a_vec, &b_vec, a, b),
        )
    }

    /// 带符号体积（右手系为正）
    pub fn volume(&self) -> f64 {
        self.columns().determinant()
    }

    pub fn frac_to_cart(&self, frac: [f64; 3]) -> [f64; 3] {
        let v = self.columns() * Vector3::from(frac);
        [v.x, v.y, v.z]
    }

    /// 晶格奇异时返回 `None`
    pub fn cart_to_frac(&self, cart: [f64; 3]) -> Option<[f64; 3]> {
        let inv = self.columns().try_inverse()?;
        let v = inv * Vector3::from(cart);
        Some([v.x, v.y, v.z])
    }
}

#[cfg(test)]
impl Lattice {
    /// 由 (a, b, c, α, β, γ) 构造，a 沿 x 轴，b 在 xy 平面内；角度单位为度
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        let (cos_a, cos_b) = (alpha.to_radians().cos(), beta.to_radians().cos());
        let (sin_g, cos_g) = gamma.to_radians().sin_cos();

        let cx = c * cos_b;
        let cy = c * (cos_a - cos_b * cos_g) / sin_g;
        let cz = (c * c - cx * cx - cy * cy).max(0.0).sqrt();

        Lattice {
            matrix: [[a, 0.0, 0.0], [b * cos_g, b * sin_g, 0.0], [cx, cy, cz]],
        }
    }
}

/// 原子
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// 元素符号
    pub element: String,
    /// 分数坐标
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }
}

/// 晶体结构
#[derive(Debug, Clone, PartialEq)]
pub struct Crystal {
    pub name: String,
    pub lattice: Lattice,
    pub atoms: Vec<Atom>,
    /// 来源格式，如 "poscar"、"struct_out"、"mp"
    pub source_format: Option<String>,
}

impl Crystal {
    pub fn new(name: impl Into<String>, lattice: Lattice, atoms: Vec<Atom>) -> Self {
        Crystal {
            name: name.into(),
            lattice,
            atoms,
            source_format: None,
        }
    }

    /// 按首次出现顺序排列的元素列表
    pub fn species(&self) -> Vec<&str> {
        let mut order: Vec<&str> = Vec::new();
        for atom in &self.atoms {
            if !order.contains(&atom.element.as_str()) {
                order.push(atom.element.as_str());
            }
        }
        order
    }

    /// 化学式，元素按首次出现顺序
    pub fn formula(&self) -> String {
        self.species()
            .into_iter()
            .map(|el| {
                let count = self.atoms.iter().filter(|a| a.element == el).count();
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect()
    }

    /// 笛卡尔坐标 (Å)
    pub fn cartesian_positions(&self) -> Vec<[f64; 3]> {
        self.atoms
            .iter()
            .map(|a| self.lattice.frac_to_cart(a.position))
            .collect()
    }
}

impl std::fmt::Display for Crystal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (a, b, c, alpha, beta, gamma) = self.lattice.parameters();
        writeln!(f, "Full Formula ({})", self.formula())?;
        writeln!(f, "abc   : {:>12.6} {:>12.6} {:>12.6}", a, b, c)?;
        writeln!(f, "angles: {:>12.6} {:>12.6} {:>12.6}", alpha, beta, gamma)?;
        writeln!(f, "volume: {:>12.6}", self.lattice.volume().abs())?;
        writeln!(f, "Sites ({})", self.atoms.len())?;
        for (i, atom) in self.atoms.iter().enumerate() {
            write!(
                f,
                "{:>4}  {:<3} {:>10.6} {:>10.6} {:>10.6}",
                i, atom.element, atom.position[0], atom.position[1], atom.position[2]
            )?;
            if i + 1 < self.atoms.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nacl() -> Crystal {
        let lattice = Lattice::from_parameters(5.64, 5.64, 5.64, 90.0, 90.0, 90.0);
        Crystal::new(
            "NaCl",
            lattice,
            vec![
                Atom::new("Na", [0.0, 0.0, 0.0]),
                Atom::new("Cl", [0.5, 0.5, 0.5]),
                Atom::new("Na", [0.5, 0.5, 0.0]),
            ],
        )
    }

    #[test]
    fn test_cubic_parameters_and_volume() {
        let lattice = Lattice::from_parameters(5.0, 5.0, 5.0, 90.0, 90.0, 90.0);
        let (a, b, c, alpha, beta, gamma) = lattice.parameters();

        assert!((a - 5.0).abs() < 1e-9);
        assert!((b - 5.0).abs() < 1e-9);
        assert!((c - 5.0).abs() < 1e-9);
        assert!((alpha - 90.0).abs() < 1e-9);
        assert!((beta - 90.0).abs() < 1e-9);
        assert!((gamma - 90.0).abs() < 1e-9);
        assert!((lattice.volume() - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_hexagonal_gamma() {
        let lattice = Lattice::from_parameters(3.0, 3.0, 5.0, 90.0, 90.0, 120.0);
        let (_, _, c, _, _, gamma) = lattice.parameters();
        assert!((c - 5.0).abs() < 1e-9);
        assert!((gamma - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_frac_cart_inverse() {
        let lattice = Lattice::from_vectors([[0.0, 2.7, 2.7], [2.7, 0.0, 2.7], [2.7, 2.7, 0.0]]);
        let frac = [0.25, 0.25, 0.25];
        let cart = lattice.frac_to_cart(frac);
        assert!((cart[0] - 1.35).abs() < 1e-12);

        let back = lattice.cart_to_frac(cart).unwrap();
        for i in 0..3 {
            assert!((back[i] - frac[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_singular_lattice_has_no_inverse() {
        let lattice = Lattice::from_vectors([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(lattice.cart_to_frac([1.0, 1.0, 1.0]).is_none());
    }

    #[test]
    fn test_species_and_formula_keep_first_appearance() {
        let crystal = nacl();
        assert_eq!(crystal.species(), vec!["Na", "Cl"]);
        assert_eq!(crystal.formula(), "Na2Cl");
    }

    #[test]
    fn test_display_summary() {
        let text = nacl().to_string();
        assert!(text.starts_with("Full Formula (Na2Cl)"));
        assert!(text.contains("Sites (3)"));
    }
}
