// ==========================================
// 空气污染风险评估 - 分类器制品 (Classifier Bundle)
// ==========================================
// 组成: 预训练模型 + 特征缩放器 + 标签编码器 + 特征名列表
// 生命周期: 启动时加载一次，之后只读
// ==========================================

use crate::domain::prediction::round_to;
use crate::domain::types::RiskCategory;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 制品未声明准确率时使用的默认值
pub const DEFAULT_MODEL_ACCURACY: f64 = 0.85;

/// 推理错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("X has {actual} features, but the model is expecting {expected} features as input")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("y contains previously unseen label code: {0}")]
    UnknownClassCode(usize),

    #[error("predicted class '{0}' is not a known risk category")]
    UnknownCategory(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),
}

// ==========================================
// Scaler - 特征缩放器
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scaler {
    /// 标准化: (x - mean) / scale
    Standard {
        #[serde(with = "plain_array")]
        mean: Array1<f64>,
        #[serde(with = "plain_array")]
        scale: Array1<f64>,
    },
    /// 归一化到 [0,1]: (x - min) / (max - min)
    MinMax {
        #[serde(with = "plain_array")]
        data_min: Array1<f64>,
        #[serde(with = "plain_array")]
        data_max: Array1<f64>,
    },
    /// 原始值
    Identity,
}

impl Scaler {
    /// 拟合时的特征数量（Identity 不限制）
    pub fn width(&self) -> Option<usize> {
        match self {
            Scaler::Standard { mean, .. } => Some(mean.len()),
            Scaler::MinMax { data_min, .. } => Some(data_min.len()),
            Scaler::Identity => None,
        }
    }

    pub fn transform(&self, x: &[f64]) -> Result<Array1<f64>, ModelError> {
        if let Some(expected) = self.width() {
            if expected != x.len() {
                return Err(ModelError::FeatureCountMismatch {
                    expected,
                    actual: x.len(),
                });
            }
        }

        let x = ArrayView1::from(x);
        let out = match self {
            Scaler::Standard { mean, scale } => (&x - mean) / &scale.mapv(non_zero),
            Scaler::MinMax { data_min, data_max } => {
                (&x - data_min) / &(data_max - data_min).mapv(non_zero)
            }
            Scaler::Identity => x.to_owned(),
        };
        Ok(out)
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Scaler::Standard { mean, scale } if mean.len() != scale.len() => Err(format!(
                "standard scaler has {} means but {} scales",
                mean.len(),
                scale.len()
            )),
            Scaler::MinMax { data_min, data_max } if data_min.len() != data_max.len() => {
                Err(format!(
                    "min_max scaler has {} minimums but {} maximums",
                    data_min.len(),
                    data_max.len()
                ))
            }
            _ => Ok(()),
        }
    }
}

/// 零方差特征不缩放
fn non_zero(v: f64) -> f64 {
    if v == 0.0 {
        1.0
    } else {
        v
    }
}

// ==========================================
// LabelEncoder - 标签编码器
// ==========================================
// 整数编码 <-> 类别名 的双射
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn inverse_transform(&self, code: usize) -> Result<&str, ModelError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(ModelError::UnknownClassCode(code))
    }
}

// ==========================================
// Estimator - 预训练模型
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    /// 决策树（支持概率估计）
    DecisionTree { nodes: Vec<TreeNode> },
    /// 最近质心（不支持概率估计），每行一个类别
    NearestCentroid {
        #[serde(with = "plain_matrix")]
        centroids: Array2<f64>,
    },
}

/// 决策树节点（数组编码，`feature` 为空表示叶子）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: Option<usize>,
    #[serde(default)]
    pub right: Option<usize>,
    /// 叶子上各类别的样本数
    #[serde(default, with = "plain_array")]
    pub value: Array1<f64>,
}

impl Estimator {
    /// 模型类型名（对外展示）
    pub fn type_name(&self) -> &'static str {
        match self {
            Estimator::DecisionTree { .. } => "DecisionTreeClassifier",
            Estimator::NearestCentroid { .. } => "NearestCentroid",
        }
    }

    pub fn supports_proba(&self) -> bool {
        matches!(self, Estimator::DecisionTree { .. })
    }

    /// 预测类别编码
    pub fn predict(&self, x: ArrayView1<'_, f64>) -> Result<usize, ModelError> {
        match self {
            Estimator::DecisionTree { .. } => Ok(argmax(self.leaf_values(x)?)),
            Estimator::NearestCentroid { centroids } => {
                if centroids.ncols() != x.len() {
                    return Err(ModelError::FeatureCountMismatch {
                        expected: centroids.ncols(),
                        actual: x.len(),
                    });
                }
                if centroids.nrows() == 0 {
                    return Err(ModelError::InvalidModel("no centroids".to_string()));
                }
                // 各质心到 x 的平方欧氏距离
                let distances = (centroids - &x).mapv(|d| d * d).sum_axis(Axis(1));
                Ok(argmin(distances.view()))
            }
        }
    }

    /// 各类别概率（叶子计数归一化），调用前应先检查 supports_proba
    pub fn predict_proba(&self, x: ArrayView1<'_, f64>) -> Result<Array1<f64>, ModelError> {
        match self {
            Estimator::DecisionTree { .. } => {
                let leaf = self.leaf_values(x)?;
                let total = leaf.sum();
                if total <= 0.0 {
                    return Err(ModelError::InvalidModel("empty leaf".to_string()));
                }
                Ok(&leaf / total)
            }
            Estimator::NearestCentroid { .. } => Err(ModelError::InvalidModel(format!(
                "{} does not support predict_proba",
                self.type_name()
            ))),
        }
    }

    /// 沿决策树下降到叶子: x[feature] <= threshold 走左子树
    fn leaf_values(&self, x: ArrayView1<'_, f64>) -> Result<ArrayView1<'_, f64>, ModelError> {
        let Estimator::DecisionTree { nodes } = self else {
            return Err(ModelError::InvalidModel("not a decision tree".to_string()));
        };

        let mut idx = 0usize;
        // 合法的树最多访问 nodes.len() 个节点
        for _ in 0..=nodes.len() {
            let node = nodes
                .get(idx)
                .ok_or_else(|| ModelError::InvalidModel(format!("node {} out of range", idx)))?;
            let Some(feature) = node.feature else {
                return Ok(node.value.view());
            };
            let v = *x.get(feature).ok_or(ModelError::FeatureCountMismatch {
                expected: feature + 1,
                actual: x.len(),
            })?;
            let next = if v <= node.threshold { node.left } else { node.right };
            idx = next.ok_or_else(|| {
                ModelError::InvalidModel(format!("split node {} is missing a child", idx))
            })?;
        }
        Err(ModelError::InvalidModel("cycle in decision tree".to_string()))
    }

    fn validate(&self, n_classes: usize, n_features: usize) -> Result<(), String> {
        match self {
            Estimator::DecisionTree { nodes } => {
                if nodes.is_empty() {
                    return Err("decision tree has no nodes".to_string());
                }
                for (i, node) in nodes.iter().enumerate() {
                    match node.feature {
                        Some(f) => {
                            if f >= n_features {
                                return Err(format!("node {} splits on unknown feature {}", i, f));
                            }
                            for child in [node.left, node.right] {
                                match child {
                                    Some(c) if c < nodes.len() && c != i => {}
                                    _ => return Err(format!("node {} has an invalid child", i)),
                                }
                            }
                        }
                        None => {
                            if node.value.len() != n_classes {
                                return Err(format!(
                                    "leaf {} has {} class counts, expected {}",
                                    i,
                                    node.value.len(),
                                    n_classes
                                ));
                            }
                        }
                    }
                }
                Ok(())
            }
            Estimator::NearestCentroid { centroids } => {
                if centroids.nrows() != n_classes {
                    return Err(format!(
                        "{} centroids for {} classes",
                        centroids.nrows(),
                        n_classes
                    ));
                }
                if centroids.ncols() != n_features {
                    return Err(format!(
                        "centroid width {} does not match {} features",
                        centroids.ncols(),
                        n_features
                    ));
                }
                Ok(())
            }
        }
    }
}

/// 首个最大值的下标
fn argmax(values: ArrayView1<'_, f64>) -> usize {
    values
        .indexed_iter()
        .fold((0usize, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
            if v > bv {
                (i, v)
            } else {
                (bi, bv)
            }
        })
        .0
}

/// 首个最小值的下标
fn argmin(values: ArrayView1<'_, f64>) -> usize {
    values
        .indexed_iter()
        .fold((0usize, f64::INFINITY), |(bi, bv), (i, &v)| {
            if v < bv {
                (i, v)
            } else {
                (bi, bv)
            }
        })
        .0
}

// ==========================================
// 制品文件中的数组格式
// ==========================================
// 向量写作 [f64]，矩阵写作按行的 [[f64]]

mod plain_array {
    use ndarray::Array1;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Array1<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<f64>::deserialize(deserializer).map(Array1::from)
    }
}

mod plain_matrix {
    use ndarray::Array2;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(matrix: &Array2<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(matrix.outer_iter().map(|row| row.to_vec()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Array2<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        let width = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(D::Error::custom(format!(
                "matrix rows have different lengths: {} and {}",
                width,
                row.len()
            )));
        }
        Array2::from_shape_vec((rows.len(), width), rows.concat()).map_err(D::Error::custom)
    }
}

// ==========================================
// ClassifierBundle - 完整制品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierBundle {
    pub model: Estimator,
    pub scaler: Scaler,
    pub label_encoder: LabelEncoder,
    pub features: Vec<String>,
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
}

fn default_accuracy() -> f64 {
    DEFAULT_MODEL_ACCURACY
}

impl ClassifierBundle {
    /// 结构一致性校验（加载时调用，失败则整体退回规则模式）
    pub fn validate(&self) -> Result<(), String> {
        if self.label_encoder.classes.is_empty() {
            return Err("label encoder has no classes".to_string());
        }
        if self.features.is_empty() {
            return Err("feature list is empty".to_string());
        }
        self.scaler.validate()?;
        if let Some(width) = self.scaler.width() {
            if width != self.features.len() {
                return Err(format!(
                    "scaler was fitted on {} features but {} are declared",
                    width,
                    self.features.len()
                ));
            }
        }
        self.model
            .validate(self.label_encoder.classes.len(), self.features.len())
    }
}

// ==========================================
// ModelMetadata - 运行时模型元数据
// ==========================================
// 启动时由制品（或其缺失）确定，之后只读
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMetadata {
    pub loaded: bool,
    pub model_type: String,
    /// 准确率 (0-1)
    pub accuracy: f64,
    pub features: Vec<String>,
    pub classes: Vec<String>,
}

impl ModelMetadata {
    pub fn from_bundle(bundle: Option<&ClassifierBundle>) -> Self {
        match bundle {
            Some(b) => Self {
                loaded: true,
                model_type: b.model.type_name().to_string(),
                accuracy: b.accuracy,
                features: b.features.clone(),
                classes: b.label_encoder.classes.clone(),
            },
            None => Self::rule_based(),
        }
    }

    /// 规则模式: 无特征列表，类别取三级风险
    pub fn rule_based() -> Self {
        Self {
            loaded: false,
            model_type: "Rule-Based".to_string(),
            accuracy: DEFAULT_MODEL_ACCURACY,
            features: Vec::new(),
            classes: RiskCategory::ALL.iter().map(|c| c.as_str().to_string()).collect(),
        }
    }

    /// 准确率百分比，保留两位小数
    pub fn accuracy_percent(&self) -> f64 {
        round_to(self.accuracy * 100.0, 2)
    }
}
